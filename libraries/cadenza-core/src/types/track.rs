/// Track domain type
use crate::error::{CadenzaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Composite catalog track key: `"{catalogItemId}/{fileName}"`.
///
/// Tracks live in external catalogs, not locally; playlists store these
/// keys as opaque strings. The archive adapter produces the composite
/// form, the Jamendo adapter a numeric id rendered as a string (which
/// never contains a separator).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackKey(String);

impl TrackKey {
    /// Build a composite key from a catalog item id and a file name.
    pub fn new(item_id: &str, file_name: &str) -> Self {
        Self(format!("{item_id}/{file_name}"))
    }

    /// Wrap an already-formed key string.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Split a composite key into `(catalogItemId, fileName)`.
    ///
    /// The key must contain a single `/` separator with non-empty parts
    /// on both sides.
    pub fn split(&self) -> Result<(&str, &str)> {
        match self.0.split_once('/') {
            Some((item, file)) if !item.is_empty() && !file.is_empty() => Ok((item, file)),
            _ => Err(CadenzaError::invalid_input(format!(
                "malformed track key: {:?}",
                self.0
            ))),
        }
    }

    /// The raw key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TrackKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// A playable track, normalized from a catalog response.
///
/// All fields beyond `id` and `title` are best-effort: catalogs return
/// polymorphic and frequently absent metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog track key (see [`TrackKey`])
    pub id: TrackKey,

    /// Track title
    pub title: String,

    /// Artist display name ("Unknown Artist" when the catalog is blank)
    pub artist: String,

    /// Catalog artist id, when the catalog has a real artist entity
    pub artist_id: Option<String>,

    /// Album title
    pub album: Option<String>,

    /// Catalog album / item identifier
    pub album_id: Option<String>,

    /// Cover image URL
    pub cover_url: Option<String>,

    /// Direct stream URL
    pub stream_url: Option<String>,

    /// Track duration, when the catalog reports a parseable length
    pub duration: Option<Duration>,

    /// First genre tag
    pub genre: Option<String>,

    /// Track number within its album
    pub track_number: Option<u32>,
}

impl Track {
    /// Render the duration as `m:ss`, or `--:--` when absent.
    pub fn duration_formatted(&self) -> String {
        match self.duration {
            Some(d) => {
                let total = d.as_secs();
                format!("{}:{:02}", total / 60, total % 60)
            }
            None => "--:--".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_key_splits() {
        let key = TrackKey::new("gd1977-05-08", "02 Scarlet Begonias.mp3");
        let (item, file) = key.split().unwrap();
        assert_eq!(item, "gd1977-05-08");
        assert_eq!(file, "02 Scarlet Begonias.mp3");
    }

    #[test]
    fn key_without_separator_is_rejected() {
        assert!(TrackKey::from_raw("1468123").split().is_err());
        assert!(TrackKey::from_raw("/file.mp3").split().is_err());
        assert!(TrackKey::from_raw("item/").split().is_err());
    }

    #[test]
    fn duration_formatting() {
        let mut track = Track {
            id: TrackKey::from_raw("a/b.mp3"),
            title: "Test".to_string(),
            artist: "Artist".to_string(),
            artist_id: None,
            album: None,
            album_id: None,
            cover_url: None,
            stream_url: None,
            duration: Some(Duration::from_secs(245)),
            genre: None,
            track_number: None,
        };
        assert_eq!(track.duration_formatted(), "4:05");

        track.duration = None;
        assert_eq!(track.duration_formatted(), "--:--");
    }
}
