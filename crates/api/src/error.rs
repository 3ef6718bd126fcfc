//! Error envelope for API responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mediashelf_core::content::ContentError;
use mediashelf_core::upload::UploadError;
use mediashelf_shared::AppError;
use serde_json::json;

/// Message returned in place of infrastructure details.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// API error rendered as `{ "error": CODE, "message": text }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Shortcut for 401 Unauthorized.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(msg.into()))
    }

    /// Shortcut for 503 when object storage is not configured.
    #[must_use]
    pub fn storage_not_configured() -> Self {
        Self(AppError::ServiceUnavailable(
            "File storage is not configured".to_string(),
        ))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if err.is_exposable() {
            err.message().to_string()
        } else {
            tracing::error!(error = %err, "Request failed");
            INTERNAL_MESSAGE.to_string()
        };

        let body = Json(json!({
            "error": err.error_code(),
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        Self(match err {
            ContentError::Validation(msg) => AppError::Validation(msg),
            ContentError::NotFound(id) => AppError::NotFound(format!("content {id} not found")),
            ContentError::Storage(e) if e.is_input_error() => AppError::Validation(e.to_string()),
            ContentError::Storage(e) => AppError::Internal(e.to_string()),
            ContentError::Repository(msg) => AppError::Database(msg),
        })
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        Self(match err {
            UploadError::Validation(msg) => AppError::Validation(msg),
            e @ UploadError::UploadAuthorization(_) => AppError::UploadAuthorization(e.to_string()),
            e @ UploadError::Deletion(_) => AppError::Deletion(e.to_string()),
        })
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}
