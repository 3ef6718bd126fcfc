use super::*;

#[test]
fn test_app_error_status_codes() {
    assert_eq!(AppError::Unauthorized("test".into()).status_code(), 401);
    assert_eq!(AppError::NotFound("test".into()).status_code(), 404);
    assert_eq!(AppError::Validation("test".into()).status_code(), 400);
    assert_eq!(AppError::UploadAuthorization("test".into()).status_code(), 502);
    assert_eq!(AppError::Deletion("test".into()).status_code(), 502);
    assert_eq!(AppError::ServiceUnavailable("test".into()).status_code(), 503);
    assert_eq!(AppError::Database("test".into()).status_code(), 500);
    assert_eq!(AppError::Internal("test".into()).status_code(), 500);
}

#[test]
fn test_app_error_error_codes() {
    assert_eq!(
        AppError::Unauthorized("test".into()).error_code(),
        "UNAUTHORIZED"
    );
    assert_eq!(AppError::NotFound("test".into()).error_code(), "NOT_FOUND");
    assert_eq!(
        AppError::Validation("test".into()).error_code(),
        "VALIDATION_ERROR"
    );
    assert_eq!(
        AppError::UploadAuthorization("test".into()).error_code(),
        "UPLOAD_AUTHORIZATION_ERROR"
    );
    assert_eq!(
        AppError::Deletion("test".into()).error_code(),
        "DELETION_ERROR"
    );
    assert_eq!(
        AppError::ServiceUnavailable("test".into()).error_code(),
        "SERVICE_UNAVAILABLE"
    );
    assert_eq!(
        AppError::Database("test".into()).error_code(),
        "DATABASE_ERROR"
    );
    assert_eq!(
        AppError::Internal("test".into()).error_code(),
        "INTERNAL_ERROR"
    );
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        format!("{}", AppError::Unauthorized("msg".into())),
        "Authentication failed: msg"
    );
    assert_eq!(
        format!("{}", AppError::NotFound("msg".into())),
        "Not found: msg"
    );
    assert_eq!(
        format!("{}", AppError::Validation("msg".into())),
        "Validation error: msg"
    );
    assert_eq!(
        format!("{}", AppError::UploadAuthorization("msg".into())),
        "Upload authorization failed: msg"
    );
    assert_eq!(
        format!("{}", AppError::Deletion("msg".into())),
        "Deletion failed: msg"
    );
}

#[test]
fn test_infrastructure_errors_are_not_exposable() {
    assert!(AppError::Validation("x".into()).is_exposable());
    assert!(AppError::NotFound("x".into()).is_exposable());
    assert!(!AppError::Database("x".into()).is_exposable());
    assert!(!AppError::Internal("x".into()).is_exposable());
}

#[test]
fn test_message_strips_prefix() {
    assert_eq!(
        AppError::Validation("title is required".into()).message(),
        "title is required"
    );
    assert_eq!(AppError::Database("conn refused".into()).message(), "conn refused");
}
