//! Cadenza Catalog
//!
//! Adapters that normalize heterogeneous third-party music catalogs into
//! the uniform `Track`/`Album`/`Artist` shape, plus the TTL result cache
//! that wraps them.
//!
//! # Adapters
//!
//! - [`ArchiveCatalog`] — the archive.org advanced-search and metadata
//!   endpoints. No API key; artist identity is the denormalized creator
//!   name; track identity is `"{identifier}/{fileName}"`.
//! - [`JamendoCatalog`] — the Jamendo v3.0 API. Requires a `client_id`;
//!   tracks/albums/artists are real entities with numeric ids.
//!
//! # Failure policy
//!
//! Network failures and malformed responses degrade to empty results with
//! a `tracing` warning. Cancellation (a superseding search, a closed
//! page) propagates as [`CatalogError::Cancelled`] and aborts the caller's
//! await chain.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod cache;
pub mod duration;
mod error;
pub mod flex;
pub mod jamendo;

pub use archive::ArchiveCatalog;
pub use cache::{ResultCache, ENTITY_TTL, LIST_TTL, SEARCH_TTL};
pub use error::{CatalogError, Result};
pub use jamendo::JamendoCatalog;

use async_trait::async_trait;
use cadenza_core::{Album, Artist, Track, TrackKey};
use tokio_util::sync::CancellationToken;

/// Combined result of a free-text catalog search.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Matching tracks
    pub tracks: Vec<Track>,
    /// Matching albums
    pub albums: Vec<Album>,
    /// Matching artists
    pub artists: Vec<Artist>,
}

impl SearchOutcome {
    /// Total number of results across all kinds.
    pub fn total_count(&self) -> usize {
        self.tracks.len() + self.albums.len() + self.artists.len()
    }

    /// Whether any result was found.
    pub fn has_results(&self) -> bool {
        self.total_count() > 0
    }
}

/// Catalog-wide statistics for the admin statistics page.
#[derive(Debug, Clone, Default)]
pub struct CatalogStatistics {
    /// Total audio items in the catalog (0 when the catalog cannot count)
    pub total_audio_items: u64,
    /// Total items tagged as music
    pub total_music_items: u64,
    /// Most popular track, when resolvable
    pub most_popular_track: Option<Track>,
    /// Most popular album, when resolvable
    pub most_popular_album: Option<Album>,
    /// Most popular artist, when resolvable
    pub most_popular_artist: Option<Artist>,
    /// Per-genre item counts, descending
    pub genre_stats: Vec<(String, u64)>,
}

/// A normalized external music catalog.
///
/// Implementations must follow the degradation policy documented at the
/// crate level: empty results on failure, `Cancelled` on cancellation.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Free-text search across tracks, albums, and artists.
    async fn search(
        &self,
        query: &str,
        limit: usize,
        token: CancellationToken,
    ) -> Result<SearchOutcome>;

    /// Resolve a single track by its catalog key.
    async fn track(&self, key: &TrackKey) -> Result<Option<Track>>;

    /// Fetch an album by catalog id (without tracks).
    async fn album(&self, id: &str) -> Result<Option<Album>>;

    /// Ordered tracks of an album.
    async fn album_tracks(&self, id: &str) -> Result<Vec<Track>>;

    /// Fetch an artist by id (archive: the creator name).
    async fn artist(&self, id: &str) -> Result<Option<Artist>>;

    /// An artist's tracks, deduplicated.
    async fn artist_tracks(&self, id: &str) -> Result<Vec<Track>>;

    /// An artist's albums.
    async fn artist_albums(&self, id: &str) -> Result<Vec<Album>>;

    /// Most popular tracks.
    async fn popular_tracks(&self, limit: usize) -> Result<Vec<Track>>;

    /// Most popular albums.
    async fn popular_albums(&self, limit: usize) -> Result<Vec<Album>>;

    /// Most popular artists.
    async fn popular_artists(&self, limit: usize) -> Result<Vec<Artist>>;

    /// Tracks for a genre tag.
    async fn tracks_by_genre(
        &self,
        genre: &str,
        limit: usize,
        token: CancellationToken,
    ) -> Result<Vec<Track>>;

    /// Recently released tracks.
    async fn new_releases(&self, limit: usize) -> Result<Vec<Track>>;

    /// Genre tags this adapter understands.
    fn genres(&self) -> Vec<String>;

    /// Resolve the direct stream URL for a track.
    async fn stream_url(&self, track: &Track) -> Result<Option<String>>;

    /// Catalog-wide statistics (admin page). Fan-out joins on completion;
    /// individual failures degrade per field.
    async fn statistics(&self, token: CancellationToken) -> Result<CatalogStatistics>;
}
