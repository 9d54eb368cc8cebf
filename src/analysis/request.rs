//! Request assembly: map uploaded documents and a prompt into a content sequence.

use crate::analysis::types::UploadedDocument;
use crate::gemini::{FileData, Part};

/// Build the ordered content sequence for a generation call.
///
/// One file-reference part per document, in upload order, followed by
/// exactly one text part carrying the prompt.
pub(crate) fn build_contents(documents: &[UploadedDocument], prompt: &str) -> Vec<Part> {
    let mut parts: Vec<Part> = documents
        .iter()
        .map(|document| Part::FileData {
            file_data: FileData {
                file_uri: document.remote.uri.clone(),
                mime_type: document.remote.mime_type.clone(),
            },
        })
        .collect();
    parts.push(Part::Text {
        text: prompt.to_string(),
    });
    parts
}

/// Unified-summary prompt used when the caller supplies none.
pub fn default_prompt(file_count: usize) -> String {
    format!(
        "\nYou have been provided with {file_count} different documents.\n\
         Please analyze all of them and provide a unified, structured summary in markdown format.\n\
         The summary must include:\n\
         1. A **Consolidated Executive Summary** of the overall findings.\n\
         2. A **Comparative Analysis** section highlighting the key differences and similarities across the reports.\n\
         3. A list of **5 Actionable Recommendations** based on the collective data.\n"
    )
}
