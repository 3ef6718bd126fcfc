//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - RPC-style routes under `/api/v1/rpc/<procedure>`
//! - Authentication middleware and the caller extractor
//! - The JSON error envelope

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use mediashelf_core::content::ContentService;
use mediashelf_core::storage::StorageService;
use mediashelf_db::ContentRepository;
use mediashelf_shared::JwtService;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token validation.
    pub jwt_service: Arc<JwtService>,
    /// Storage service for cover images (optional).
    pub storage: Option<Arc<StorageService>>,
    /// Reject image keys that are not in the bucket.
    pub verify_image_keys: bool,
}

impl AppState {
    /// Content service backed by the database and, when configured, storage.
    #[must_use]
    pub fn content_service(&self) -> ContentService<ContentRepository> {
        let repo = Arc::new(ContentRepository::new((*self.db).clone()));
        let service = ContentService::new(repo);
        match &self.storage {
            Some(storage) => service.with_storage(Arc::clone(storage), self.verify_image_keys),
            None => service,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
