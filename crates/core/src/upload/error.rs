//! Upload error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Upload procedure errors.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Request failed validation; nothing was signed or deleted.
    #[error("{0}")]
    Validation(String),

    /// The signer could not issue a credential.
    #[error("failed to generate upload URL: {0}")]
    UploadAuthorization(String),

    /// The storage provider rejected or failed the delete.
    #[error("failed to delete file: {0}")]
    Deletion(String),
}

impl UploadError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Classify a signing failure; input errors stay validation errors.
    #[must_use]
    pub fn from_presign(err: StorageError) -> Self {
        if err.is_input_error() {
            Self::Validation(err.to_string())
        } else {
            Self::UploadAuthorization(err.to_string())
        }
    }

    /// Classify a delete failure; input errors stay validation errors.
    #[must_use]
    pub fn from_delete(err: StorageError) -> Self {
        if err.is_input_error() {
            Self::Validation(err.to_string())
        } else {
            Self::Deletion(err.to_string())
        }
    }
}
