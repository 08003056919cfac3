/// Album domain type
use crate::types::Track;
use serde::{Deserialize, Serialize};

/// A catalog album.
///
/// For the archive adapter an "album" is a catalog item (a collection of
/// files under one identifier); for Jamendo it is a real album entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Catalog identifier
    pub id: String,

    /// Album title ("Unknown Album" when the catalog is blank)
    pub title: String,

    /// Artist display name
    pub artist_name: String,

    /// Catalog artist id, when available
    pub artist_id: Option<String>,

    /// Cover image URL
    pub cover_url: Option<String>,

    /// Release year or date text as reported by the catalog
    pub release_date: Option<String>,

    /// Ordered album tracks (empty until loaded)
    pub tracks: Vec<Track>,
}

impl Album {
    /// Position of a track in this album's order, by key.
    pub fn position_of(&self, key: &crate::types::TrackKey) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == key)
    }
}
