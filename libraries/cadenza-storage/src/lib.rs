//! Cadenza Storage
//!
//! `SQLite` persistence for the Cadenza client: listener and admin
//! accounts, playlists, cover/profile-picture rows, and the listener ↔
//! playlist link table.
//!
//! # Architecture
//!
//! - **Vertical slicing**: each feature owns its own queries
//!   (`listeners`, `admins`, `pictures`, `playlists`).
//! - **Per-operation access**: callers share a pool; every logical
//!   operation opens its own connection, and multi-step mutations run in
//!   an explicit transaction committed only on success.
//! - **External tracks**: playlists store opaque catalog track keys, not
//!   foreign keys — the track catalog lives on the network.
//!
//! # Example
//!
//! ```rust,no_run
//! use cadenza_storage::{create_pool, run_migrations, seed};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://cadenza.db").await?;
//! run_migrations(&pool).await?;
//! seed::ensure_defaults(&pool).await?;
//!
//! let listeners = cadenza_storage::listeners::search_by_name(&pool, "").await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;

// Vertical slices
pub mod admins;
pub mod listeners;
pub mod pictures;
pub mod playlists;

// Cross-slice services
pub mod auth;
pub mod files;
pub mod seed;

pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into the binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations.
///
/// Called once at application startup to bring the schema up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g. `sqlite://cadenza.db`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}
