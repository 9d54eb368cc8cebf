//! Shared types used by the Gemini client.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned while interacting with the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Base URL failed to parse or normalize.
    #[error("Invalid Gemini URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed before receiving a response.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Gemini responded with an unexpected status code.
    #[error("Unexpected Gemini response ({status}): {body}")]
    UnexpectedStatus {
        /// HTTP status returned from the API.
        status: StatusCode,
        /// Body payload associated with the failing response.
        body: String,
    },
    /// Gemini returned a payload the client could not interpret.
    #[error("Malformed Gemini response: {0}")]
    InvalidResponse(String),
}

/// One document accepted by the remote file store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// Server-assigned identifier (`files/<id>`), used for deletion.
    pub name: String,
    /// Human-readable name echoed back from the upload metadata.
    #[serde(default)]
    pub display_name: String,
    /// Declared MIME type of the stored document.
    pub mime_type: String,
    /// Opaque reference used in generation requests.
    pub uri: String,
}

/// Typed part of a generation request's content sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Part {
    /// Reference to a previously uploaded document.
    FileData {
        /// Stored-file reference carried by this part.
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
    /// Literal prompt text.
    Text {
        /// Text carried by this part.
        text: String,
    },
}

/// Stored-file reference embedded in a [`Part::FileData`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    /// URI assigned by the file store at upload time.
    pub file_uri: String,
    /// MIME type recorded for the stored document.
    pub mime_type: String,
}

/// Summary text and token accounting extracted from a generation response.
#[derive(Debug, Clone)]
pub struct GeneratedContent {
    /// Concatenated text of the first candidate.
    pub text: String,
    /// Prompt token count reported by the service; zero when unreported.
    pub prompt_tokens: u64,
}

#[derive(Deserialize)]
pub(crate) struct UploadResponse {
    pub(crate) file: StoredFile,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub(crate) candidates: Vec<Candidate>,
    #[serde(default)]
    pub(crate) usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub(crate) content: Option<CandidateContent>,
}

#[derive(Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub(crate) parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
pub(crate) struct ResponsePart {
    #[serde(default)]
    pub(crate) text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UsageMetadata {
    #[serde(default)]
    pub(crate) prompt_token_count: u64,
}
