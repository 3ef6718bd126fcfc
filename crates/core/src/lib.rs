//! Core business logic for Mediashelf.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and storage handshakes live here.
//!
//! # Modules
//!
//! - `content` - Content records, list filtering, create/update rules
//! - `storage` - Object storage gateway (presigned uploads, deletes)
//! - `upload` - Upload procedures built on the storage gateway

pub mod content;
pub mod storage;
pub mod upload;
