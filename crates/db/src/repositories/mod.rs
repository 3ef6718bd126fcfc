//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod content;
pub mod user;

pub use content::ContentRepository;
pub use user::UserRepository;
