//! Content catalogue: records, list filtering, and create/update rules.
//!
//! This module provides business logic for content records including:
//! - Input validation and defaulting
//! - Category and search predicates for listing
//! - Identity stamping on create and update
//! - Optional verification that cover image keys were uploaded

mod error;
mod filter;
mod service;
mod types;

pub use error::ContentError;
pub use filter::{ContentFilter, ContentListQuery, LIKE_ESCAPE};
pub use service::{ContentRepository, ContentService};
pub use types::{
    ContentCategory, ContentDraft, ContentInput, ContentPage, ContentRecord, Entry, EntryInput,
    Identity, UpdateContentInput,
};
