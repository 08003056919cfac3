/// Artist domain type
use crate::types::{Album, Track};
use serde::{Deserialize, Serialize};

/// A catalog artist.
///
/// The archive catalog has no artist entity; artists there are grouped by
/// creator name and `id` is `None`. Jamendo artists carry a numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    /// Catalog artist id, when the catalog has one
    pub id: Option<String>,

    /// Display name (the grouping key for the archive adapter)
    pub name: String,

    /// Profile image URL
    pub image_url: Option<String>,

    /// Most popular tracks (empty until loaded)
    pub top_tracks: Vec<Track>,

    /// Albums by this artist (empty until loaded)
    pub albums: Vec<Album>,
}

impl Artist {
    /// Create an artist with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            image_url: None,
            top_tracks: Vec::new(),
            albums: Vec::new(),
        }
    }
}
