//! Error types for storage operations

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while looking up an object
#[derive(Error, Debug)]
pub enum StorageError {
    /// The bucket or object does not exist
    #[error("Object not found: {0}")]
    NotFound(String),

    /// The caller's credential may not read the object
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Upstream service error (5xx from Cloud Storage)
    #[error("Upstream service error: {0}")]
    Upstream(String),

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Cloud Storage answered with a body that could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl StorageError {
    /// Whether retrying the same request later may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream(_) | Self::Transport(_))
    }
}
