/// Playlist domain types
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum playlist description length.
pub const MAX_DESCRIPTION_LEN: usize = 300;

/// A listener-owned playlist.
///
/// Track membership is an ordered list of opaque catalog keys — tracks
/// live in the external catalogs, so there is no track foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Database id
    pub id: i64,

    /// Playlist title (max 100 chars)
    pub title: String,

    /// Optional description (max 300 chars); empty stays empty, never null
    pub description: Option<String>,

    /// Cover row id
    pub cover_id: i64,

    /// Creating listener id
    pub creator_id: i64,

    /// Creation date
    pub created_at: NaiveDate,

    /// Ordered catalog track keys
    pub track_keys: Vec<String>,
}

/// A playlist cover row. Append-only, like profile pictures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistCover {
    /// Database id
    pub id: i64,

    /// Path of the stored image file
    pub file_path: String,
}

/// Listener ↔ playlist association with a composite key.
///
/// Allows a playlist to be visible to multiple listeners; in practice the
/// creator link is written at playlist creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerPlaylistLink {
    /// Listener side of the composite key
    pub listener_id: i64,

    /// Playlist side of the composite key
    pub playlist_id: i64,
}
