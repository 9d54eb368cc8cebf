//! End-to-end pipeline scenarios driven through `AnalysisService` against a
//! mocked Gemini API, using real files on disk.

use std::path::PathBuf;
use std::sync::Once;

use docsum::analysis::AnalysisService;
use docsum::config::{CONFIG, Config};
use docsum::gemini::GeminiClient;
use httpmock::{Method::DELETE, Method::POST, Mock, MockServer};
use serde_json::json;
use tempfile::TempDir;

fn ensure_test_config() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = CONFIG.set(Config {
            gemini_api_key: "test-key".into(),
            gemini_base_url: "http://127.0.0.1:1".into(),
            gemini_model: "gemini-2.5-flash".into(),
            server_port: None,
        });
    });
}

fn service_for(server: &MockServer) -> AnalysisService {
    ensure_test_config();
    let client = GeminiClient::with_base_url(&server.base_url(), "test-key").expect("client");
    AnalysisService::new(client)
}

fn write_document(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, format!("contents of {name}")).expect("write document");
    path
}

/// Register the two-request upload mocks for one document.
async fn mock_upload<'a>(server: &'a MockServer, display_name: &str, id: &str) -> (Mock<'a>, Mock<'a>) {
    let session_path = format!("/upload-session/{id}");
    let start = server
        .mock_async({
            let session_url = server.url(session_path.as_str());
            let display_name = display_name.to_string();
            move |when, then| {
                when.method(POST)
                    .path("/upload/v1beta/files")
                    .json_body(json!({ "file": { "display_name": display_name } }));
                then.status(200)
                    .header("x-goog-upload-url", session_url.as_str());
            }
        })
        .await;
    let finalize = server
        .mock_async({
            let display_name = display_name.to_string();
            let id = id.to_string();
            move |when, then| {
                when.method(POST).path(session_path.clone());
                then.status(200).json_body(json!({
                    "file": {
                        "name": format!("files/{id}"),
                        "displayName": display_name,
                        "mimeType": "application/pdf",
                        "uri": format!("https://example.org/v1beta/files/{id}")
                    }
                }));
            }
        })
        .await;
    (start, finalize)
}

#[tokio::test]
async fn mixed_batch_uploads_existing_files_and_cleans_up() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let path_a = write_document(&dir, "a.pdf");
    let path_b = dir.path().join("b.pdf");
    let path_c = write_document(&dir, "c.pdf");

    let (start_a, finalize_a) = mock_upload(&server, "a.pdf", "doc-a").await;
    let (start_c, finalize_c) = mock_upload(&server, "c.pdf", "doc-c").await;

    let generate = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent")
                .json_body(json!({
                    "contents": [{
                        "parts": [
                            {
                                "fileData": {
                                    "fileUri": "https://example.org/v1beta/files/doc-a",
                                    "mimeType": "application/pdf"
                                }
                            },
                            {
                                "fileData": {
                                    "fileUri": "https://example.org/v1beta/files/doc-c",
                                    "mimeType": "application/pdf"
                                }
                            },
                            { "text": "P" }
                        ]
                    }]
                }));
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "Combined summary." }] }
                }],
                "usageMetadata": { "promptTokenCount": 777 }
            }));
        })
        .await;

    let delete_a = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/v1beta/files/doc-a");
            then.status(200).json_body(json!({}));
        })
        .await;
    let delete_c = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/v1beta/files/doc-c");
            then.status(200).json_body(json!({}));
        })
        .await;

    let service = service_for(&server);
    let outcome = service
        .analyze(&[path_a, path_b, path_c], "P")
        .await;

    assert!(outcome.succeeded);
    assert_eq!(outcome.summary_text.as_deref(), Some("Combined summary."));
    assert_eq!(outcome.token_usage, Some(777));
    assert_eq!(outcome.files_analyzed, 2);
    assert_eq!(outcome.failure_reason, None);

    start_a.assert_async().await;
    finalize_a.assert_async().await;
    start_c.assert_async().await;
    finalize_c.assert_async().await;
    generate.assert_async().await;
    delete_a.assert_async().await;
    delete_c.assert_async().await;
}

#[tokio::test]
async fn upload_failure_aborts_batch_before_generation() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let path_x = write_document(&dir, "x.pdf");

    let start = server
        .mock_async(|when, then| {
            when.method(POST).path("/upload/v1beta/files");
            then.status(503).body("store unavailable");
        })
        .await;
    let generate = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent");
            then.status(200).json_body(json!({}));
        })
        .await;

    let service = service_for(&server);
    let outcome = service.analyze(&[path_x], "P").await;

    assert!(!outcome.succeeded);
    let reason = outcome.failure_reason.expect("failure reason");
    assert!(reason.starts_with("Failed to upload file:"), "{reason}");
    assert!(reason.contains("store unavailable"), "{reason}");
    assert_eq!(outcome.files_analyzed, 0);

    start.assert_async().await;
    assert_eq!(generate.hits_async().await, 0);
}

#[tokio::test]
async fn generation_failure_still_cleans_up_uploads() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let path_y = write_document(&dir, "y.pdf");

    let (_start, _finalize) = mock_upload(&server, "y.pdf", "doc-y").await;
    let generate = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent");
            then.status(500).body("model overloaded");
        })
        .await;
    let delete_y = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/v1beta/files/doc-y");
            then.status(200).json_body(json!({}));
        })
        .await;

    let service = service_for(&server);
    let outcome = service.analyze(&[path_y], "P").await;

    assert!(!outcome.succeeded);
    let reason = outcome.failure_reason.expect("failure reason");
    assert!(reason.starts_with("Content generation failed:"), "{reason}");

    generate.assert_async().await;
    delete_y.assert_async().await;
}

#[tokio::test]
async fn empty_path_list_fails_without_remote_calls() {
    let server = MockServer::start_async().await;
    let upload = server
        .mock_async(|when, then| {
            when.method(POST).path("/upload/v1beta/files");
            then.status(200).json_body(json!({}));
        })
        .await;

    let service = service_for(&server);
    let outcome = service.analyze(&[], "P").await;

    assert!(!outcome.succeeded);
    assert_eq!(
        outcome.failure_reason.as_deref(),
        Some("No documents available")
    );
    assert_eq!(outcome.files_analyzed, 0);
    assert_eq!(upload.hits_async().await, 0);
}

#[tokio::test]
async fn all_paths_missing_fails_without_remote_calls() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let missing_one = dir.path().join("gone.pdf");
    let missing_two = dir.path().join("also-gone.pdf");

    let upload = server
        .mock_async(|when, then| {
            when.method(POST).path("/upload/v1beta/files");
            then.status(200).json_body(json!({}));
        })
        .await;

    let service = service_for(&server);
    let outcome = service.analyze(&[missing_one, missing_two], "P").await;

    assert!(!outcome.succeeded);
    assert_eq!(
        outcome.failure_reason.as_deref(),
        Some("No documents available")
    );
    assert_eq!(upload.hits_async().await, 0);
}

#[tokio::test]
async fn deletion_failure_never_changes_run_outcome() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let path_a = write_document(&dir, "first.pdf");
    let path_b = write_document(&dir, "second.pdf");

    let _mocks_a = mock_upload(&server, "first.pdf", "doc-first").await;
    let _mocks_b = mock_upload(&server, "second.pdf", "doc-second").await;

    let generate = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "Still fine." }] }
                }],
                "usageMetadata": { "promptTokenCount": 10 }
            }));
        })
        .await;

    let delete_first = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/v1beta/files/doc-first");
            then.status(500).body("deletion refused");
        })
        .await;
    let delete_second = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/v1beta/files/doc-second");
            then.status(200).json_body(json!({}));
        })
        .await;

    let service = service_for(&server);
    let outcome = service.analyze(&[path_a, path_b], "P").await;

    assert!(outcome.succeeded);
    assert_eq!(outcome.summary_text.as_deref(), Some("Still fine."));
    assert_eq!(outcome.failure_reason, None);
    assert_eq!(outcome.files_analyzed, 2);

    generate.assert_async().await;
    // The failed deletion is attempted exactly once and does not stop the
    // second deletion.
    delete_first.assert_async().await;
    delete_second.assert_async().await;
}
