//! Router harness for handler tests.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use mediashelf_core::storage::StorageService;
use mediashelf_shared::{Claims, JwtConfig, JwtService};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{AppState, create_router};

pub(crate) struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// App with a disconnected database and no storage.
    pub fn new() -> Self {
        Self::build(None)
    }

    pub fn with_storage(storage: Arc<StorageService>) -> Self {
        Self::build(Some(storage))
    }

    fn build(storage: Option<Arc<StorageService>>) -> Self {
        let state = AppState {
            db: Arc::new(DatabaseConnection::default()),
            jwt_service: Arc::new(JwtService::new(&JwtConfig {
                secret: "test-secret".to_string(),
            })),
            storage,
            verify_image_keys: false,
        };
        let router = create_router(state.clone(), Duration::from_secs(5));
        Self { state, router }
    }

    pub fn token(&self) -> String {
        let claims = Claims::new(Uuid::now_v7(), chrono::Utc::now()).with_name("Tester");
        self.state
            .jwt_service
            .issue_token_for(claims, chrono::Duration::minutes(15))
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        token: Option<&str>,
        payload: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.post_raw(uri, token, &payload.to_string()).await
    }

    pub async fn post_raw(
        &self,
        uri: &str,
        token: Option<&str>,
        body: &str,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, body)
    }
}

/// Token that expired well outside the validation leeway.
pub(crate) fn expired_token(state: &AppState) -> String {
    let claims = Claims::new(Uuid::now_v7(), chrono::Utc::now());
    state
        .jwt_service
        .issue_token_for(claims, chrono::Duration::minutes(-10))
        .unwrap()
}
