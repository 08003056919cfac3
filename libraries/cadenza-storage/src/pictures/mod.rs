//! Profile picture and playlist cover rows.
//!
//! Both tables are append-only: uploads insert new rows and the owning
//! entity's foreign key is repointed, never overwritten in place.

use crate::error::{Result, StorageError};
use cadenza_core::{PlaylistCover, ProfilePicture};
use sqlx::{Row, SqlitePool};

/// Insert a profile picture row.
pub async fn insert_profile_picture(pool: &SqlitePool, file_path: &str) -> Result<ProfilePicture> {
    let result = sqlx::query("INSERT INTO profile_pictures (file_path) VALUES (?)")
        .bind(file_path)
        .execute(pool)
        .await?;

    Ok(ProfilePicture {
        id: result.last_insert_rowid(),
        file_path: file_path.to_string(),
    })
}

/// Get a profile picture by id.
pub async fn get_profile_picture(pool: &SqlitePool, id: i64) -> Result<Option<ProfilePicture>> {
    let row = sqlx::query("SELECT id, file_path FROM profile_pictures WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| ProfilePicture {
        id: row.get("id"),
        file_path: row.get("file_path"),
    }))
}

/// Find a profile picture row by exact file path (seeded defaults).
pub async fn profile_picture_by_path(
    pool: &SqlitePool,
    file_path: &str,
) -> Result<Option<ProfilePicture>> {
    let row = sqlx::query("SELECT id, file_path FROM profile_pictures WHERE file_path = ? LIMIT 1")
        .bind(file_path)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| ProfilePicture {
        id: row.get("id"),
        file_path: row.get("file_path"),
    }))
}

/// The seeded default profile picture.
pub async fn default_profile_picture(pool: &SqlitePool) -> Result<ProfilePicture> {
    profile_picture_by_path(pool, crate::seed::DEFAULT_PROFILE_PICTURE_PATH)
        .await?
        .ok_or_else(|| StorageError::not_found("ProfilePicture", "default"))
}

/// Insert a playlist cover row.
pub async fn insert_playlist_cover(pool: &SqlitePool, file_path: &str) -> Result<PlaylistCover> {
    let result = sqlx::query("INSERT INTO playlist_covers (file_path) VALUES (?)")
        .bind(file_path)
        .execute(pool)
        .await?;

    Ok(PlaylistCover {
        id: result.last_insert_rowid(),
        file_path: file_path.to_string(),
    })
}

/// Get a playlist cover by id.
pub async fn get_playlist_cover(pool: &SqlitePool, id: i64) -> Result<Option<PlaylistCover>> {
    let row = sqlx::query("SELECT id, file_path FROM playlist_covers WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| PlaylistCover {
        id: row.get("id"),
        file_path: row.get("file_path"),
    }))
}

/// Find a playlist cover row by exact file path (seeded defaults).
pub async fn playlist_cover_by_path(
    pool: &SqlitePool,
    file_path: &str,
) -> Result<Option<PlaylistCover>> {
    let row = sqlx::query("SELECT id, file_path FROM playlist_covers WHERE file_path = ? LIMIT 1")
        .bind(file_path)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| PlaylistCover {
        id: row.get("id"),
        file_path: row.get("file_path"),
    }))
}
