//! # AppError
//!
//! Centralized error handling for the civic reporter.
//! The rule pipeline itself is total; these variants come from the ports
//! (persistence, media storage) and from input checks at the HTTP boundary.

use thiserror::Error;

/// The primary error type for all cr-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., a persisted report ID)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Invalid input rejected before reaching the pipeline
    /// (e.g., missing upload, empty filename, out-of-range coordinates)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Resource already exists (e.g., two reports stamped in the same second)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., DB down, disk full)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for civic reporter logic.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
