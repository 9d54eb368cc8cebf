//! HTTP client wrapper for the Gemini file store and generation endpoints.

use crate::config::get_config;
use crate::gemini::types::{
    GeminiError, GenerateContentResponse, GeneratedContent, Part, StoredFile, UploadResponse,
};
use reqwest::{Client, Method};
use serde_json::json;

/// Lightweight HTTP client for Gemini operations.
///
/// Holds the API credential and transport only; there is no per-run state,
/// so one instance built at process start is safely reused for every
/// orchestration run.
pub struct GeminiClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
}

impl GeminiClient {
    /// Construct a new client using configuration derived from the environment.
    pub fn new() -> Result<Self, GeminiError> {
        let config = get_config();
        let client = Self::with_base_url(&config.gemini_base_url, &config.gemini_api_key)?;
        tracing::debug!(
            url = %client.base_url,
            model = %config.gemini_model,
            "Initialized Gemini HTTP client"
        );
        Ok(client)
    }

    /// Construct a client against an explicit endpoint, bypassing configuration.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, GeminiError> {
        let client = Client::builder().user_agent("docsum/0.1").build()?;
        let base_url = normalize_base_url(base_url).map_err(GeminiError::InvalidUrl)?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Upload one document to the remote file store.
    ///
    /// Performs the resumable handshake: a `start` request carrying the
    /// display name and byte count, then one `upload, finalize` request
    /// posting the document bytes to the returned session URL.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
        display_name: &str,
    ) -> Result<StoredFile, GeminiError> {
        let start = self
            .request(Method::POST, "upload/v1beta/files")
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", bytes.len())
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&json!({ "file": { "display_name": display_name } }))
            .send()
            .await?;

        if !start.status().is_success() {
            return Err(self.unexpected_status(start, "Upload session rejected").await);
        }

        let session_url = start
            .headers()
            .get("x-goog-upload-url")
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string)
            .ok_or_else(|| {
                GeminiError::InvalidResponse(
                    "upload session response missing x-goog-upload-url header".into(),
                )
            })?;

        let response = self
            .client
            .post(session_url)
            .header("x-goog-api-key", &self.api_key)
            .header("X-Goog-Upload-Command", "upload, finalize")
            .header("X-Goog-Upload-Offset", "0")
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.unexpected_status(response, "Upload failed").await);
        }

        let payload: UploadResponse = response.json().await?;
        tracing::debug!(name = %payload.file.name, display_name, "File uploaded");
        Ok(payload.file)
    }

    /// Delete a stored file by its `files/<id>` identifier.
    pub async fn delete_file(&self, name: &str) -> Result<(), GeminiError> {
        let response = self
            .request(Method::DELETE, &format!("v1beta/{name}"))
            .send()
            .await?;

        self.ensure_success(response, || {
            tracing::debug!(name, "File deleted");
        })
        .await
    }

    /// Invoke the generation model with an ordered content sequence.
    ///
    /// Token accounting is best-effort: a response without usage metadata
    /// yields a zero prompt token count rather than an error.
    pub async fn generate_content(
        &self,
        model: &str,
        parts: Vec<Part>,
    ) -> Result<GeneratedContent, GeminiError> {
        let body = json!({ "contents": [{ "parts": parts }] });

        let response = self
            .request(
                Method::POST,
                &format!("v1beta/models/{model}:generateContent"),
            )
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self
                .unexpected_status(response, "Generation request failed")
                .await);
        }

        let payload: GenerateContentResponse = response.json().await?;
        let prompt_tokens = payload
            .usage_metadata
            .map(|usage| usage.prompt_token_count)
            .unwrap_or(0);
        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                GeminiError::InvalidResponse("generation response contained no text".into())
            })?;

        Ok(GeneratedContent {
            text: text.trim().to_string(),
            prompt_tokens,
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format_endpoint(&self.base_url, path);
        self.client
            .request(method, url)
            .header("x-goog-api-key", &self.api_key)
    }

    async fn ensure_success<F>(
        &self,
        response: reqwest::Response,
        on_success: F,
    ) -> Result<(), GeminiError>
    where
        F: FnOnce(),
    {
        if response.status().is_success() {
            on_success();
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let error = GeminiError::UnexpectedStatus { status, body };
            tracing::error!(error = %error, "Gemini request failed");
            Err(error)
        }
    }

    async fn unexpected_status(&self, response: reqwest::Response, message: &str) -> GeminiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let error = GeminiError::UnexpectedStatus { status, body };
        tracing::error!(error = %error, "{message}");
        error
    }
}

fn normalize_base_url(url: &str) -> Result<String, String> {
    let mut parsed = reqwest::Url::parse(url).map_err(|err| err.to_string())?;
    let path = parsed.path().trim_end_matches('/').to_string();
    parsed.set_path(&path);
    Ok(parsed.to_string())
}

fn format_endpoint(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}
