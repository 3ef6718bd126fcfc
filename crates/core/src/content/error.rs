//! Content error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Content operation errors.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Input failed validation.
    #[error("{0}")]
    Validation(String),

    /// Content not found.
    #[error("content not found: {0}")]
    NotFound(String),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl ContentError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
