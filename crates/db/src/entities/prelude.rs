//! Entity re-exports.

pub use super::contents::Entity as Contents;
pub use super::users::Entity as Users;
