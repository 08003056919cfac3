//! The listener's media library: playlist CRUD and track resolution.

use cadenza_catalog::Catalog;
use cadenza_core::{CadenzaError, Playlist, Result, Track, TrackKey};
use cadenza_storage::playlists;
use futures_util::future::join_all;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::warn;

/// Cap on concurrent catalog lookups while resolving a playlist.
const RESOLVE_CONCURRENCY: usize = 5;

/// Playlist operations for the signed-in listener.
pub struct LibraryController {
    catalog: Arc<dyn Catalog>,
    limiter: Arc<Semaphore>,
}

impl LibraryController {
    /// Create a controller over a catalog.
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            limiter: Arc::new(Semaphore::new(RESOLVE_CONCURRENCY)),
        }
    }

    /// The listener's playlists.
    pub async fn playlists(&self, pool: &SqlitePool, listener_id: i64) -> Result<Vec<Playlist>> {
        Ok(playlists::get_for_listener(pool, listener_id).await?)
    }

    /// Create the next default-named playlist ("Favorites" first, then
    /// numbered) and link it to the listener.
    pub async fn create_playlist(&self, pool: &SqlitePool, listener_id: i64) -> Result<Playlist> {
        Ok(playlists::create_for_listener(pool, listener_id).await?)
    }

    /// Update a playlist's title/description, optionally with a new cover
    /// image path already stored by `cadenza_storage::files`.
    pub async fn update_playlist(
        &self,
        pool: &SqlitePool,
        playlist_id: i64,
        title: &str,
        description: &str,
        new_cover_path: Option<&str>,
    ) -> Result<Playlist> {
        if title.trim().is_empty() {
            return Err(CadenzaError::validation("Title cannot be empty"));
        }
        if description.chars().count() > cadenza_core::types::MAX_DESCRIPTION_LEN {
            return Err(CadenzaError::validation(
                "Description must not exceed 300 characters",
            ));
        }

        Ok(playlists::update(pool, playlist_id, title, description, new_cover_path).await?)
    }

    /// Delete a playlist (its link rows cascade).
    pub async fn delete_playlist(&self, pool: &SqlitePool, playlist_id: i64) -> Result<()> {
        Ok(playlists::delete(pool, playlist_id).await?)
    }

    /// Append a track to a playlist.
    pub async fn add_track(
        &self,
        pool: &SqlitePool,
        playlist_id: i64,
        key: &TrackKey,
    ) -> Result<Playlist> {
        Ok(playlists::add_track_key(pool, playlist_id, key.as_str()).await?)
    }

    /// Remove a track from a playlist.
    pub async fn remove_track(
        &self,
        pool: &SqlitePool,
        playlist_id: i64,
        key: &TrackKey,
    ) -> Result<Playlist> {
        Ok(playlists::remove_track_key(pool, playlist_id, key.as_str()).await?)
    }

    /// Resolve a playlist's stored track keys through the catalog, in
    /// playlist order. Keys the catalog no longer yields are skipped, not
    /// errors — external catalogs drop items.
    pub async fn resolve_tracks(&self, playlist: &Playlist) -> Result<Vec<Track>> {
        let lookups = playlist.track_keys.iter().map(|raw| {
            let key = TrackKey::from_raw(raw.clone());
            let catalog = Arc::clone(&self.catalog);
            let limiter = Arc::clone(&self.limiter);
            async move {
                let Ok(_permit) = limiter.acquire().await else {
                    return None;
                };
                match catalog.track(&key).await {
                    Ok(track) => track,
                    Err(err) => {
                        warn!(key = %key, error = %err, "playlist track failed to resolve");
                        None
                    }
                }
            }
        });

        Ok(join_all(lookups).await.into_iter().flatten().collect())
    }
}
