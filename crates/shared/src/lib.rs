//! Shared types, errors, and configuration for Mediashelf.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list procedures
//! - Application-wide error types
//! - Configuration management
//! - Bearer token claims and the per-request caller identity

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::{Caller, Claims};
pub use config::{AppConfig, JwtConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
