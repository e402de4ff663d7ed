//! Error types for the milon library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for milon operations.
///
/// Network and upstream-data failures never surface here: the provider
/// adapters degrade to empty results at their own boundary. These variants
/// cover the hard failures - operator and programmer misconfiguration.
#[derive(Debug, Error)]
pub enum MilonError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error saving or loading a persisted document.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error (bad settings file, invalid API key header).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown batch category name.
    #[error("Unknown category '{0}' (expected a CEFR level, 'placeholders', or 'all')")]
    UnknownCategory(String),

    /// Rejected input at the application boundary.
    #[error("Validation error: {0}")]
    Validation(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for milon operations.
pub type Result<T> = std::result::Result<T, MilonError>;
