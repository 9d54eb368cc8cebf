#![deny(missing_docs)]

//! Core library for the docsum batch document-analysis service.

/// Batch analysis pipeline: upload, request assembly, generation, cleanup.
pub mod analysis;
/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Gemini REST client for file storage and content generation.
pub mod gemini;
/// Structured logging and tracing setup.
pub mod logging;
