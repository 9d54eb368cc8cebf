//! Batch analysis pipeline: upload, request assembly, generation, cleanup.
//!
//! Uploads apply a fail-fast policy (the first failure aborts the batch),
//! while cleanup isolates failures and always attempts every deletion. The
//! orchestrator in [`service`] threads each stage's result explicitly so a
//! run always ends in a well-formed [`AnalysisOutcome`].

mod cleanup;
mod request;
mod service;
mod types;
mod upload;

pub use request::default_prompt;
pub use service::{AnalysisApi, AnalysisService};
pub use types::{AnalysisError, AnalysisOutcome, UploadedDocument};
