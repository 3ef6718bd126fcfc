//! Mediashelf API Server
//!
//! Main entry point for the Mediashelf backend service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediashelf_api::{AppState, create_router};
use mediashelf_core::storage::{StorageConfig, StorageService};
use mediashelf_db::connect_with;
use mediashelf_shared::{AppConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediashelf=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = connect_with(&config.database).await?;
    info!("Connected to database");

    let jwt_service = JwtService::new(&config.jwt);

    let (storage, verify_image_keys) = match config.storage {
        Some(settings) => {
            let verify = settings.verify_image_keys;
            let storage = StorageService::from_config(StorageConfig::from(settings))
                .context("failed to initialize object storage")?;
            info!(
                provider = storage.provider_name(),
                bucket = storage.bucket(),
                verify_image_keys = verify,
                "Object storage configured"
            );
            (Some(Arc::new(storage)), verify)
        }
        None => {
            warn!("Object storage not configured; upload procedures will return 503");
            (None, false)
        }
    };

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        storage,
        verify_image_keys,
    };

    let app = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
