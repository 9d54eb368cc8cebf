//! Gemini REST API integration: file store and content generation.

pub mod client;
pub mod types;

pub use client::GeminiClient;
pub use types::{FileData, GeminiError, GeneratedContent, Part, StoredFile};
