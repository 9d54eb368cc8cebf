//! HTTP surface for docsum.
//!
//! This module exposes a compact Axum router with a handful of endpoints:
//!
//! - `GET /analyze` – Upload the listed documents, request one combined
//!   summary, and reclaim the remote storage. Returns the run outcome as
//!   JSON with status 200 on success and 500 on failure (same shape, with
//!   `failureReason` populated).
//! - `GET /health` – Liveness probe with an RFC3339 timestamp.
//! - `GET /` – Machine-readable endpoint catalog for quick discovery.
//!
//! The HTTP surface shares the analysis pipeline with the CLI, so behavior
//! is identical across interfaces.

use crate::analysis::{AnalysisApi, AnalysisOutcome, default_prompt};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use time::OffsetDateTime;

/// Build the HTTP router exposing the analysis API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: AnalysisApi + 'static,
{
    Router::new()
        .route("/analyze", get(analyze::<S>))
        .route("/health", get(health))
        .route("/", get(api_docs))
        .with_state(service)
}

/// Query parameters accepted by the `GET /analyze` endpoint.
#[derive(Deserialize)]
struct AnalyzeParams {
    /// Comma-separated list of local document paths.
    #[serde(default)]
    files: Option<String>,
    /// Optional prompt override (defaults to the unified-summary prompt).
    #[serde(default)]
    prompt: Option<String>,
}

/// Run one analysis over the listed documents.
///
/// An absent or empty `files` parameter reaches the pipeline as an empty
/// batch and comes back as the no-documents failure outcome.
async fn analyze<S>(
    State(service): State<Arc<S>>,
    Query(params): Query<AnalyzeParams>,
) -> (StatusCode, Json<AnalysisOutcome>)
where
    S: AnalysisApi,
{
    let paths = parse_file_list(params.files.as_deref());
    let prompt = params
        .prompt
        .filter(|prompt| !prompt.trim().is_empty())
        .unwrap_or_else(|| default_prompt(paths.len()));

    tracing::info!(files = paths.len(), "Analyze request received");
    let outcome = service.analyze(&paths, &prompt).await;

    let status = if outcome.succeeded {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(outcome))
}

fn parse_file_list(files: Option<&str>) -> Vec<PathBuf> {
    files
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

/// Liveness probe.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: current_timestamp_rfc3339(),
    })
}

fn current_timestamp_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

/// Descriptor for a single endpoint in the discovery catalog.
#[derive(Serialize)]
struct EndpointDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    example: Option<&'static str>,
}

/// Response body for `GET /`.
#[derive(Serialize)]
struct ApiDocsResponse {
    message: &'static str,
    endpoints: Vec<EndpointDescriptor>,
}

/// Enumerate supported HTTP endpoints for discovery/UX in hosts and tools.
async fn api_docs() -> Json<ApiDocsResponse> {
    Json(ApiDocsResponse {
        message: "Multi-document analyzer API",
        endpoints: vec![
            EndpointDescriptor {
                name: "analyze",
                method: "GET",
                path: "/analyze",
                description: "Upload the listed local documents, generate one combined summary, and delete the uploads. Query params: `files` (comma-separated paths), `prompt` (optional).",
                example: Some("/analyze?files=./data/file1.pdf,./data/file2.pdf"),
            },
            EndpointDescriptor {
                name: "health",
                method: "GET",
                path: "/health",
                description: "Health check endpoint.",
                example: None,
            },
        ],
    })
}
