//! Centralized error types for capsuleShell.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the capsuleShell library.
#[derive(Error, Debug)]
pub enum CapsuleError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified attachment file does not exist.
    #[error("Attachment file not found: {0}")]
    FileNotFound(PathBuf),

    /// A delivery date string could not be parsed as a calendar date.
    #[error("Invalid delivery date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// The submission service reported a failure.
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// An invalid path was provided.
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Convenience alias for `Result<T, CapsuleError>`.
pub type Result<T> = std::result::Result<T, CapsuleError>;

impl CapsuleError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` inside functions returning `CapsuleError`
/// when no path context is available (rare — prefer `CapsuleError::io`).
impl From<std::io::Error> for CapsuleError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
