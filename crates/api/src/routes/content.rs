//! Content procedures: `content.getList`, `content.getById`, `content.create`, `content.update`.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post},
};
use mediashelf_core::content::{
    ContentInput, ContentListQuery, ContentPage, ContentRecord, UpdateContentInput,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Read procedures, open to anonymous callers.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/rpc/content.getList", get(get_list))
        .route("/rpc/content.getById", get(get_by_id))
}

/// Mutating procedures; mount behind the auth middleware.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/rpc/content.create", post(create))
        .route("/rpc/content.update", post(update))
}

/// Query string for `content.getById`.
#[derive(Debug, Deserialize)]
pub struct GetByIdQuery {
    /// Content ID.
    pub id: String,
}

/// GET `/rpc/content.getList`
async fn get_list(
    State(state): State<AppState>,
    query: Result<Query<ContentListQuery>, QueryRejection>,
) -> Result<Json<ContentPage>, ApiError> {
    let Query(query) = query?;
    let page = state.content_service().list(query).await?;
    Ok(Json(page))
}

/// GET `/rpc/content.getById?id=`
async fn get_by_id(
    State(state): State<AppState>,
    query: Result<Query<GetByIdQuery>, QueryRejection>,
) -> Result<Json<ContentRecord>, ApiError> {
    let Query(query) = query?;
    let record = state.content_service().get_by_id(&query.id).await?;
    Ok(Json(record))
}

/// POST `/rpc/content.create`
async fn create(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<ContentInput>, JsonRejection>,
) -> Result<Json<ContentRecord>, ApiError> {
    let Json(input) = payload?;
    let record = state.content_service().create(&caller, input).await?;
    Ok(Json(record))
}

/// POST `/rpc/content.update`
async fn update(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<UpdateContentInput>, JsonRejection>,
) -> Result<Json<ContentRecord>, ApiError> {
    let Json(input) = payload?;
    let record = state.content_service().update(&caller, input).await?;
    Ok(Json(record))
}
