//! Cleanup stage: best-effort deletion of every uploaded document.

use crate::analysis::types::UploadedDocument;
use crate::gemini::GeminiClient;

/// Attempt to delete the remote artifact behind each handle.
///
/// Every handle gets exactly one deletion attempt. A failed deletion is
/// logged at warn level and the loop continues; the run's outcome is never
/// affected. Artifacts whose deletion fails remain on the remote store.
pub(crate) async fn cleanup_documents(client: &GeminiClient, documents: &[UploadedDocument]) {
    tracing::info!(count = documents.len(), "Cleaning up uploaded documents");

    for document in documents {
        match client.delete_file(&document.remote.name).await {
            Ok(()) => {
                tracing::info!(
                    name = %document.remote.name,
                    display_name = %document.remote.display_name,
                    "Deleted uploaded document"
                );
            }
            Err(error) => {
                tracing::warn!(
                    name = %document.remote.name,
                    error = %error,
                    "Failed to delete uploaded document"
                );
            }
        }
    }
}
