//! Database migration runner for Mediashelf.
//!
//! Usage:
//!   migrator up      - Apply pending migrations
//!   migrator down    - Roll back the last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop everything and re-apply

use mediashelf_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    // Reads DATABASE_URL
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
