//! Test helpers for storage integration tests.
//!
//! Tests run against real SQLite files (not in-memory) so migrations,
//! constraints, and cascade behavior match production.

use cadenza_core::Listener;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop.
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations and defaults applied.
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = cadenza_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        cadenza_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        cadenza_storage::seed::ensure_defaults(&pool)
            .await
            .expect("Failed to seed defaults");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: register a listener with the default profile picture.
pub async fn create_test_listener(pool: &SqlitePool, name: &str, email: &str) -> Listener {
    let picture = cadenza_storage::pictures::default_profile_picture(pool)
        .await
        .expect("default picture missing");

    cadenza_storage::listeners::create(
        pool,
        cadenza_storage::listeners::CreateListener {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: cadenza_storage::auth::sha256_hex("abc123"),
            profile_picture_id: picture.id,
        },
    )
    .await
    .expect("Failed to create test listener")
}
