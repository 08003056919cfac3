//! Playlist queries, including the default-playlist bootstrap.

use crate::error::{Result, StorageError};
use cadenza_core::Playlist;
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

/// Title of a listener's auto-created first playlist.
pub const FAVORITES_TITLE: &str = "Favorites";

const PLAYLIST_COLUMNS: &str =
    "id, title, description, cover_id, creator_id, created_at, track_keys";

fn row_to_playlist(row: &sqlx::sqlite::SqliteRow) -> Result<Playlist> {
    let raw_keys: String = row.get("track_keys");
    let track_keys: Vec<String> = serde_json::from_str(&raw_keys)
        .map_err(|err| StorageError::Serialization(err.to_string()))?;

    Ok(Playlist {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        cover_id: row.get("cover_id"),
        creator_id: row.get("creator_id"),
        created_at: row.get::<NaiveDate, _>("created_at"),
        track_keys,
    })
}

/// Create the next default-named playlist for a listener and link it.
///
/// A listener's first playlist is titled "Favorites" and bound to the
/// dedicated favorites cover; later ones get a numbered default name and
/// the generic cover. Playlist insert and link row are one transaction.
pub async fn create_for_listener(pool: &SqlitePool, listener_id: i64) -> Result<Playlist> {
    let existing = count_for_creator(pool, listener_id).await?;

    let (title, cover_path) = if existing == 0 {
        (
            FAVORITES_TITLE.to_string(),
            crate::seed::FAVORITES_COVER_PATH,
        )
    } else {
        (
            format!("Playlist {}", existing + 1),
            crate::seed::DEFAULT_COVER_PATH,
        )
    };

    let cover = crate::pictures::playlist_cover_by_path(pool, cover_path)
        .await?
        .ok_or_else(|| StorageError::not_found("PlaylistCover", cover_path))?;

    create_with_title(pool, listener_id, &title, cover.id).await
}

/// Create a playlist with an explicit title and cover, plus its link row.
pub async fn create_with_title(
    pool: &SqlitePool,
    listener_id: i64,
    title: &str,
    cover_id: i64,
) -> Result<Playlist> {
    let created_at = chrono::Utc::now().date_naive();

    let mut tx = pool.begin().await?;

    let inserted = sqlx::query(
        "INSERT INTO playlists (title, cover_id, creator_id, created_at, track_keys)
         VALUES (?, ?, ?, ?, '[]')",
    )
    .bind(title)
    .bind(cover_id)
    .bind(listener_id)
    .bind(created_at)
    .execute(&mut *tx)
    .await?;

    let playlist_id = inserted.last_insert_rowid();

    sqlx::query("INSERT INTO listener_playlists (listener_id, playlist_id) VALUES (?, ?)")
        .bind(listener_id)
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    get_by_id(pool, playlist_id)
        .await?
        .ok_or_else(|| StorageError::not_found("Playlist", playlist_id))
}

/// Get a playlist by id.
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Playlist>> {
    let row = sqlx::query(&format!(
        "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_playlist).transpose()
}

/// Playlists visible to a listener via the link table, oldest first.
pub async fn get_for_listener(pool: &SqlitePool, listener_id: i64) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(&format!(
        "SELECT {PLAYLIST_COLUMNS} FROM playlists p
         INNER JOIN listener_playlists lp ON lp.playlist_id = p.id
         WHERE lp.listener_id = ?
         ORDER BY p.id"
    ))
    .bind(listener_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_playlist).collect()
}

/// Update a playlist's title and description, optionally binding a fresh
/// cover row. All steps run in one transaction, committed on success.
///
/// An empty description is stored as an empty string, round-tripping as
/// empty rather than null.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    description: &str,
    new_cover_path: Option<&str>,
) -> Result<Playlist> {
    let mut tx = pool.begin().await?;

    if let Some(path) = new_cover_path {
        let inserted = sqlx::query("INSERT INTO playlist_covers (file_path) VALUES (?)")
            .bind(path)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE playlists SET cover_id = ? WHERE id = ?")
            .bind(inserted.last_insert_rowid())
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    let updated = sqlx::query("UPDATE playlists SET title = ?, description = ? WHERE id = ?")
        .bind(title)
        .bind(description)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(StorageError::not_found("Playlist", id));
    }

    tx.commit().await?;

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Playlist", id))
}

/// Delete a playlist; the link rows cascade.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let deleted = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(StorageError::not_found("Playlist", id));
    }
    Ok(())
}

/// Append a catalog track key to a playlist (no-op when already present).
pub async fn add_track_key(pool: &SqlitePool, id: i64, key: &str) -> Result<Playlist> {
    let playlist = get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Playlist", id))?;

    let mut keys = playlist.track_keys;
    if !keys.iter().any(|k| k == key) {
        keys.push(key.to_string());
        store_track_keys(pool, id, &keys).await?;
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Playlist", id))
}

/// Remove a catalog track key from a playlist.
pub async fn remove_track_key(pool: &SqlitePool, id: i64, key: &str) -> Result<Playlist> {
    let playlist = get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Playlist", id))?;

    let mut keys = playlist.track_keys;
    keys.retain(|k| k != key);
    store_track_keys(pool, id, &keys).await?;

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Playlist", id))
}

async fn store_track_keys(pool: &SqlitePool, id: i64, keys: &[String]) -> Result<()> {
    let encoded = serde_json::to_string(keys)
        .map_err(|err| StorageError::Serialization(err.to_string()))?;

    sqlx::query("UPDATE playlists SET track_keys = ? WHERE id = ?")
        .bind(encoded)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Number of playlists created by a listener.
pub async fn count_for_creator(pool: &SqlitePool, listener_id: i64) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM playlists WHERE creator_id = ?")
        .bind(listener_id)
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}

/// Total number of playlists.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM playlists")
        .fetch_one(pool)
        .await?;
    Ok(row.get("n"))
}
