//! Upload procedures: `upload.getPresignedUrl`, `upload.deleteFile`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use mediashelf_core::upload::{
    DeleteFileRequest, DeleteFileResponse, PresignRequest, UploadCredential, UploadService,
};

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the upload routes; mount behind the auth middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rpc/upload.getPresignedUrl", post(get_presigned_url))
        .route("/rpc/upload.deleteFile", post(delete_file))
}

fn upload_service(state: &AppState) -> Result<UploadService, ApiError> {
    state
        .storage
        .as_ref()
        .map(|storage| UploadService::new(Arc::clone(storage)))
        .ok_or_else(ApiError::storage_not_configured)
}

/// POST `/rpc/upload.getPresignedUrl`
async fn get_presigned_url(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<PresignRequest>, JsonRejection>,
) -> Result<Json<UploadCredential>, ApiError> {
    let service = upload_service(&state)?;
    let Json(request) = payload?;
    let credential = service.get_presigned_url(&caller, request).await?;
    Ok(Json(credential))
}

/// POST `/rpc/upload.deleteFile`
async fn delete_file(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<DeleteFileRequest>, JsonRejection>,
) -> Result<Json<DeleteFileResponse>, ApiError> {
    let service = upload_service(&state)?;
    let Json(request) = payload?;
    let response = service.delete_file(&caller, request).await?;
    Ok(Json(response))
}
