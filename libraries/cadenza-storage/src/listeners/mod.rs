//! Listener account queries

use crate::error::{Result, StorageError};
use cadenza_core::Listener;
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

/// Fields required to register a listener.
#[derive(Debug, Clone)]
pub struct CreateListener {
    /// Display name
    pub name: String,
    /// Email, unique per account
    pub email: String,
    /// Pre-hashed password (see [`crate::auth`])
    pub password_hash: String,
    /// Profile picture row to point at (the seeded default on registration)
    pub profile_picture_id: i64,
}

fn row_to_listener(row: &sqlx::sqlite::SqliteRow) -> Listener {
    Listener {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        banned: row.get::<i64, _>("banned") != 0,
        profile_picture_id: row.get("profile_picture_id"),
        password_hash: row.get("password_hash"),
        created_at: row.get::<NaiveDate, _>("created_at"),
    }
}

const LISTENER_COLUMNS: &str =
    "id, name, email, banned, profile_picture_id, password_hash, created_at";

/// Create a listener account.
///
/// A duplicate email maps to [`StorageError::Duplicate`].
pub async fn create(pool: &SqlitePool, listener: CreateListener) -> Result<Listener> {
    let created_at = chrono::Utc::now().date_naive();

    let result = sqlx::query(
        "INSERT INTO listeners (name, email, banned, profile_picture_id, password_hash, created_at)
         VALUES (?, ?, 0, ?, ?, ?)",
    )
    .bind(&listener.name)
    .bind(&listener.email)
    .bind(listener.profile_picture_id)
    .bind(&listener.password_hash)
    .bind(created_at)
    .execute(pool)
    .await
    .map_err(|err| match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StorageError::Duplicate(listener.email.clone())
        }
        _ => StorageError::Database(err),
    })?;

    let id = result.last_insert_rowid();
    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Listener", id))
}

/// Get a listener by id.
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Listener>> {
    let row = sqlx::query(&format!(
        "SELECT {LISTENER_COLUMNS} FROM listeners WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(row_to_listener))
}

/// Get a listener by email (login lookup).
pub async fn get_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Listener>> {
    let row = sqlx::query(&format!(
        "SELECT {LISTENER_COLUMNS} FROM listeners WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(row_to_listener))
}

/// List listeners whose name contains `query`; a blank query returns all.
pub async fn search_by_name(pool: &SqlitePool, query: &str) -> Result<Vec<Listener>> {
    let rows = if query.trim().is_empty() {
        sqlx::query(&format!(
            "SELECT {LISTENER_COLUMNS} FROM listeners ORDER BY name"
        ))
        .fetch_all(pool)
        .await?
    } else {
        sqlx::query(&format!(
            "SELECT {LISTENER_COLUMNS} FROM listeners WHERE name LIKE ? ORDER BY name"
        ))
        .bind(format!("%{}%", query.trim()))
        .fetch_all(pool)
        .await?
    };

    Ok(rows.iter().map(row_to_listener).collect())
}

/// Update a listener's profile.
///
/// When `new_picture_path` is set a fresh profile-picture row is inserted
/// and the listener repointed at it (rows are append-only). Both steps run
/// in one transaction, committed only on success.
pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    email: &str,
    new_picture_path: Option<&str>,
) -> Result<Listener> {
    let mut tx = pool.begin().await?;

    if let Some(path) = new_picture_path {
        let inserted = sqlx::query("INSERT INTO profile_pictures (file_path) VALUES (?)")
            .bind(path)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE listeners SET profile_picture_id = ? WHERE id = ?")
            .bind(inserted.last_insert_rowid())
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    let updated = sqlx::query("UPDATE listeners SET name = ?, email = ? WHERE id = ?")
        .bind(name)
        .bind(email)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(StorageError::not_found("Listener", id));
    }

    tx.commit().await?;

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Listener", id))
}

/// Replace a listener's password digest.
pub async fn set_password_hash(pool: &SqlitePool, id: i64, password_hash: &str) -> Result<()> {
    let updated = sqlx::query("UPDATE listeners SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(StorageError::not_found("Listener", id));
    }
    Ok(())
}

/// Flip a listener's ban flag, returning the new status.
///
/// Toggling twice returns the account to its original status.
pub async fn toggle_ban(pool: &SqlitePool, id: i64) -> Result<bool> {
    let updated = sqlx::query("UPDATE listeners SET banned = NOT banned WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(StorageError::not_found("Listener", id));
    }

    let row = sqlx::query("SELECT banned FROM listeners WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(row.get::<i64, _>("banned") != 0)
}

/// Total number of listener accounts.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM listeners")
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}

/// Number of currently banned accounts.
pub async fn banned_count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM listeners WHERE banned = 1")
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}

/// Registrations per month (`YYYY-MM`), newest first. Feeds the admin
/// report page.
pub async fn registrations_per_month(pool: &SqlitePool) -> Result<Vec<(String, i64)>> {
    let rows = sqlx::query(
        "SELECT substr(created_at, 1, 7) AS month, COUNT(*) AS n
         FROM listeners
         GROUP BY month
         ORDER BY month DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| (row.get("month"), row.get("n")))
        .collect())
}
