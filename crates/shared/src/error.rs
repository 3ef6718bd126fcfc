//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Signing an upload credential failed.
    #[error("Upload authorization failed: {0}")]
    UploadAuthorization(String),

    /// Deleting a stored object failed.
    #[error("Deletion failed: {0}")]
    Deletion(String),

    /// A collaborator required by the call is not configured.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::UploadAuthorization(_) | Self::Deletion(_) => 502,
            Self::ServiceUnavailable(_) => 503,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UploadAuthorization(_) => "UPLOAD_AUTHORIZATION_ERROR",
            Self::Deletion(_) => "DELETION_ERROR",
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthorized(msg)
            | Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::UploadAuthorization(msg)
            | Self::Deletion(msg)
            | Self::ServiceUnavailable(msg)
            | Self::Database(msg)
            | Self::Internal(msg) => msg,
        }
    }

    /// Whether the message may be shown to the caller as-is.
    ///
    /// Infrastructure faults carry driver details that stay in the logs.
    #[must_use]
    pub const fn is_exposable(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Internal(_))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
