//! `SeaORM` entity definitions.

pub mod prelude;

pub mod contents;
pub mod sea_orm_active_enums;
pub mod users;
