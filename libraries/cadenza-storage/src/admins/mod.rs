//! Admin account queries

use crate::error::Result;
use cadenza_core::Admin;
use sqlx::{Row, SqlitePool};

fn row_to_admin(row: &sqlx::sqlite::SqliteRow) -> Admin {
    Admin {
        id: row.get("id"),
        login: row.get("login"),
        password_hash: row.get("password_hash"),
    }
}

/// Create an admin account.
pub async fn create(pool: &SqlitePool, login: &str, password_hash: &str) -> Result<Admin> {
    let result = sqlx::query("INSERT INTO admins (login, password_hash) VALUES (?, ?)")
        .bind(login)
        .bind(password_hash)
        .execute(pool)
        .await?;

    Ok(Admin {
        id: result.last_insert_rowid(),
        login: login.to_string(),
        password_hash: password_hash.to_string(),
    })
}

/// Look up an admin by login name.
pub async fn get_by_login(pool: &SqlitePool, login: &str) -> Result<Option<Admin>> {
    let row = sqlx::query("SELECT id, login, password_hash FROM admins WHERE login = ?")
        .bind(login)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(row_to_admin))
}

/// Total number of admin accounts.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM admins")
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}
