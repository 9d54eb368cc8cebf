//! Upload stage: drive the file store over an ordered list of local paths.

use crate::analysis::types::{AnalysisError, UploadedDocument};
use crate::gemini::GeminiClient;
use std::path::{Path, PathBuf};

/// Upload every existing document in `paths`, preserving input order.
///
/// Missing paths are logged and skipped; they contribute no handle. The
/// first upload failure aborts the whole batch. Documents uploaded before
/// the failing one are not deleted here, so their remote artifacts outlive
/// the run.
///
/// Returns [`AnalysisError::NoDocumentsAvailable`] when no path produced a
/// handle, so callers never reach the generation stage empty-handed.
pub(crate) async fn upload_documents(
    client: &GeminiClient,
    paths: &[PathBuf],
) -> Result<Vec<UploadedDocument>, AnalysisError> {
    tracing::info!(count = paths.len(), "Starting document upload");
    let mut documents = Vec::new();

    for path in paths {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Local document not found; skipping");
            continue;
        }

        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let display_name = display_name_for(path);

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| AnalysisError::Upload(err.to_string()))?;
        let remote = client
            .upload(bytes, &mime_type, &display_name)
            .await
            .map_err(|err| AnalysisError::Upload(err.to_string()))?;

        tracing::info!(
            path = %path.display(),
            name = %remote.name,
            mime_type,
            "Document uploaded"
        );
        documents.push(UploadedDocument {
            local_path: path.clone(),
            remote,
        });
    }

    if documents.is_empty() {
        tracing::warn!("No documents were available for upload");
        return Err(AnalysisError::NoDocumentsAvailable);
    }

    Ok(documents)
}

fn display_name_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::display_name_for;
    use std::path::Path;

    #[test]
    fn display_name_uses_final_component() {
        assert_eq!(display_name_for(Path::new("./data/report.pdf")), "report.pdf");
        assert_eq!(display_name_for(Path::new("notes.txt")), "notes.txt");
    }
}
