//! Client error types.

use thiserror::Error;

/// Errors returned by [`crate::RpcClient`] and [`crate::UploadOrchestrator`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error envelope.
    #[error("{code} ({status}): {message}")]
    Api {
        /// HTTP status.
        status: u16,
        /// Machine-readable code, e.g. `VALIDATION_ERROR`.
        code: String,
        /// Human-readable message.
        message: String,
    },

    /// The file was rejected before contacting the server.
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// The direct upload to storage was not accepted.
    #[error("upload to storage failed with status {0}")]
    UploadFailed(u16),

    /// Transport or decoding failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Error code from the server envelope, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// HTTP status of a failed call, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::UploadFailed(status) => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidFile(_) => None,
        }
    }
}
