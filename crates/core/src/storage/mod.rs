//! Object storage gateway for cover images using Apache OpenDAL.
//!
//! Supported providers:
//! - S3-compatible: Cloudflare R2, AWS S3, DigitalOcean Spaces
//! - Local filesystem (development only)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Apache OpenDAL                              │
//! │                   (Unified Storage API)                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ op.presign_write("key", duration)  │ op.stat("key")             │
//! │ op.delete("key")                   │                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Clients write objects directly with the presigned URL; the service only
//! signs, checks existence, and deletes.

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{
    PresignedUrl, StorageService, UPLOAD_KEY_PREFIX, generate_upload_key, public_url,
    validate_upload_key,
};
