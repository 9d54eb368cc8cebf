//! Orchestrator sequencing upload, request assembly, generation, and cleanup.

use crate::{
    analysis::{
        cleanup::cleanup_documents,
        request::build_contents,
        types::{AnalysisError, AnalysisOutcome},
        upload::upload_documents,
    },
    config::get_config,
    gemini::GeminiClient,
};
use async_trait::async_trait;
use std::path::PathBuf;

/// Coordinates one analysis run from upload through cleanup.
///
/// The service owns the long-lived Gemini client so that both the HTTP
/// surface and the CLI reuse the same transport and credential. Construct
/// it once near process start and share it through an `Arc`; runs hold no
/// state beyond their own stack frame.
pub struct AnalysisService {
    gemini: GeminiClient,
}

/// Abstraction over the analysis pipeline used by external surfaces.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Run the full pipeline over `paths` with the supplied prompt.
    ///
    /// Always resolves to a well-formed outcome; fatal stage errors are
    /// folded into `failure_reason` rather than propagated.
    async fn analyze(&self, paths: &[PathBuf], prompt: &str) -> AnalysisOutcome;
}

impl AnalysisService {
    /// Build a new analysis service around an already-initialized client.
    pub fn new(gemini: GeminiClient) -> Self {
        Self { gemini }
    }

    /// Upload the documents, issue one combined generation request, and
    /// reclaim the remote storage.
    ///
    /// Stage results are matched explicitly: an upload failure ends the run
    /// before generation and performs no cleanup, while a generation
    /// failure still runs cleanup over every uploaded document before the
    /// failure surfaces.
    pub async fn analyze(&self, paths: &[PathBuf], prompt: &str) -> AnalysisOutcome {
        let documents = match upload_documents(&self.gemini, paths).await {
            Ok(documents) => documents,
            Err(error) => {
                tracing::error!(error = %error, "Upload stage failed");
                return AnalysisOutcome::failure(&error);
            }
        };

        let contents = build_contents(&documents, prompt);
        let model = &get_config().gemini_model;
        tracing::info!(model = %model, files = documents.len(), "Generating combined summary");
        let generated = self.gemini.generate_content(model, contents).await;

        // Generation has finished either way; reclaim remote storage before
        // surfacing the result.
        cleanup_documents(&self.gemini, &documents).await;

        match generated {
            Ok(content) => {
                tracing::info!(
                    files = documents.len(),
                    prompt_tokens = content.prompt_tokens,
                    "Analysis completed"
                );
                AnalysisOutcome::success(content.text, content.prompt_tokens, documents.len())
            }
            Err(error) => {
                let error = AnalysisError::Generation(error.to_string());
                tracing::error!(error = %error, "Generation stage failed");
                AnalysisOutcome::failure(&error)
            }
        }
    }
}

#[async_trait]
impl AnalysisApi for AnalysisService {
    async fn analyze(&self, paths: &[PathBuf], prompt: &str) -> AnalysisOutcome {
        AnalysisService::analyze(self, paths, prompt).await
    }
}
