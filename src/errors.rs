//! Error types for the sectionrank pipeline.
//!
//! Fatal errors (query input, configuration, embedding model) abort the run;
//! per-document errors are surfaced to the pipeline, logged, and skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the ranking pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Persona/job input errors (fatal - the run has no query without them)
    #[error("Query input error: {}: {}", .path.display(), .reason)]
    QueryInput { path: PathBuf, reason: String },

    /// Embedding model errors (fatal - there is no degraded mode)
    #[error("Embedding model error: {0}")]
    Model(String),

    /// Per-document extraction errors (recoverable - the document is skipped)
    #[error("Failed to extract {document}: {reason}")]
    Document { document: String, reason: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("Pipeline error: {0}")]
    Generic(String),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Convert anyhow errors to PipelineError
impl From<anyhow::Error> for PipelineError {
    fn from(err: anyhow::Error) -> Self {
        PipelineError::Generic(format!("{err:#}"))
    }
}
