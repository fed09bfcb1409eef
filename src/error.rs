//! Unified error types for tuitter
//!
//! Backend, draft storage, and configuration failures all surface through
//! [`TuitterError`]. The navigation engine itself never produces errors.

use std::path::PathBuf;

/// Unified error type for tuitter operations
#[derive(Debug, thiserror::Error)]
pub enum TuitterError {
    /// I/O errors (draft file, log file, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport errors from the REST backend
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend rejected or could not serve a request
    #[error("Backend error: {0}")]
    Backend(String),

    /// Draft storage errors
    #[error("Draft error: {path} - {reason}")]
    Draft { path: PathBuf, reason: String },

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using TuitterError
pub type Result<T> = std::result::Result<T, TuitterError>;

impl TuitterError {
    /// Create a Backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a Draft error
    pub fn draft(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Draft {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a Config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an Internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
