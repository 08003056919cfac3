//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Track information carried through playback.
///
/// A slim projection of the catalog track: everything the controller and
/// the now-playing surface need, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTrack {
    /// Opaque catalog track key
    pub key: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name (optional)
    pub album: Option<String>,

    /// Direct stream URL; selection fails with a user-visible notice when
    /// absent
    pub stream_url: Option<String>,

    /// Track duration, when known
    pub duration: Option<Duration>,
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// No stream loaded
    Idle,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Kind of container a track was selected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerKind {
    /// A catalog album
    Album,
    /// A local playlist
    Playlist,
}

/// The explicit playback context passed alongside a track at selection
/// time: which album or playlist it came from and that container's track
/// order. Continuation walks this order when a track ends naturally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Album or playlist
    pub kind: ContainerKind,

    /// Catalog album id or local playlist id
    pub id: String,

    /// Display title
    pub title: String,

    /// The container's tracks in play order
    pub tracks: Vec<PlayerTrack>,
}

impl Container {
    /// The track following `key` in this container's order, if any.
    pub fn track_after(&self, key: &str) -> Option<&PlayerTrack> {
        let index = self.tracks.iter().position(|t| t.key == key)?;
        self.tracks.get(index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(key: &str) -> PlayerTrack {
        PlayerTrack {
            key: key.to_string(),
            title: key.to_string(),
            artist: "Artist".to_string(),
            album: None,
            stream_url: Some(format!("http://stream/{key}")),
            duration: None,
        }
    }

    #[test]
    fn track_after_walks_the_order() {
        let container = Container {
            kind: ContainerKind::Album,
            id: "a1".to_string(),
            title: "Album".to_string(),
            tracks: vec![track("1"), track("2"), track("3")],
        };

        assert_eq!(container.track_after("1").unwrap().key, "2");
        assert_eq!(container.track_after("2").unwrap().key, "3");
        assert!(container.track_after("3").is_none());
        assert!(container.track_after("missing").is_none());
    }
}
