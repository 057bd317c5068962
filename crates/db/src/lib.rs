//! SQLite persistence for actors and movies.
//!
//! - [`models`] -- row structs and request DTOs with field validation.
//! - [`repositories`] -- one unit struct per table; every mutating call runs
//!   in its own transaction.
//! - [`bootstrap`] -- opt-in destructive reset with demo rows.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod bootstrap;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool from a database URL such as
/// `sqlite://casting.db?mode=rwc`. The database file is created if missing.
///
/// An in-memory URL (`sqlite::memory:`) gives every pooled connection its
/// own database, so only use it with `max_connections = 1`.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
