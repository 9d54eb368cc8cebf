//! Core data types and error definitions for the analysis pipeline.

use crate::gemini::StoredFile;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that terminate an analysis run.
///
/// Missing local documents and failed deletions are handled inside their
/// stages (logged and skipped) and never appear here.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Remote store rejected or could not complete an upload; the batch is
    /// aborted without contacting the generation service.
    #[error("Failed to upload file: {0}")]
    Upload(String),
    /// Zero documents survived the upload pass.
    #[error("No documents available")]
    NoDocumentsAvailable,
    /// Remote generation call failed; cleanup has already run by the time
    /// this surfaces.
    #[error("Content generation failed: {0}")]
    Generation(String),
}

/// One local document accepted by the remote file store.
///
/// Produced only when the local file existed and the store accepted the
/// upload; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// Path of the source document on the local filesystem.
    pub local_path: PathBuf,
    /// Handle assigned by the remote store.
    pub remote: StoredFile,
}

/// Result of one analysis run, surfaced to the CLI and HTTP callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    /// Whether the run produced a summary.
    pub succeeded: bool,
    /// Unified summary text, present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_text: Option<String>,
    /// Prompt token count reported by the service; zero when unreported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<u64>,
    /// Number of uploaded documents sent to the generation call.
    pub files_analyzed: usize,
    /// Human-readable reason, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl AnalysisOutcome {
    /// Build a success outcome from the generation results.
    pub fn success(summary_text: String, token_usage: u64, files_analyzed: usize) -> Self {
        Self {
            succeeded: true,
            summary_text: Some(summary_text),
            token_usage: Some(token_usage),
            files_analyzed,
            failure_reason: None,
        }
    }

    /// Build a failure outcome carrying the fatal error's message.
    pub fn failure(error: &AnalysisError) -> Self {
        Self {
            succeeded: false,
            summary_text: None,
            token_usage: None,
            files_analyzed: 0,
            failure_reason: Some(error.to_string()),
        }
    }
}
