//! Card view models.
//!
//! The factory that the original built WPF visuals with, reduced to its
//! contract: given a domain record and the context it sits in, produce a
//! clickable card; given an activation, yield the action to dispatch.
//! Track cards carry their originating container explicitly, so playback
//! receives the album/playlist order with the track instead of digging
//! context out of a widget tag.

use cadenza_core::{Album, Artist, Listener, Playlist, Track};
use cadenza_playback::{Container, ContainerKind, PlayerTrack};

/// What a card represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    /// A playable track
    Track,
    /// A catalog album
    Album,
    /// A catalog artist
    Artist,
    /// A local playlist
    Playlist,
    /// A listener account (admin ban list)
    Listener,
}

/// The action a card activation dispatches.
#[derive(Debug, Clone)]
pub enum CardAction {
    /// Start playback, with the explicit container context
    PlayTrack {
        /// The track to play
        track: Track,
        /// Album/playlist context, `None` for bare search results
        container: Option<Container>,
    },
    /// Open an album page
    OpenAlbum {
        /// Catalog album id
        id: String,
    },
    /// Open an artist page
    OpenArtist {
        /// Catalog artist id or creator name
        id: String,
    },
    /// Open a playlist collection page
    OpenPlaylist {
        /// Playlist id
        id: i64,
    },
    /// Flip a listener's ban flag (admin ban list)
    ToggleBan {
        /// Listener id
        listener_id: i64,
    },
}

/// A clickable visual, minus the visuals.
#[derive(Debug, Clone)]
pub struct Card {
    /// What the card shows
    pub kind: CardKind,
    /// Primary line
    pub title: String,
    /// Secondary line
    pub subtitle: String,
    /// Cover/avatar image, when one exists
    pub image_url: Option<String>,
    /// Dispatched on activation
    pub action: CardAction,
}

/// Project a catalog track into the playback-layer track.
pub fn player_track(track: &Track) -> PlayerTrack {
    PlayerTrack {
        key: track.id.as_str().to_string(),
        title: track.title.clone(),
        artist: track.artist.clone(),
        album: track.album.clone(),
        stream_url: track.stream_url.clone(),
        duration: track.duration,
    }
}

/// Playback container for an album's track order.
pub fn album_container(album: &Album) -> Container {
    Container {
        kind: ContainerKind::Album,
        id: album.id.clone(),
        title: album.title.clone(),
        tracks: album.tracks.iter().map(player_track).collect(),
    }
}

/// Playback container for a playlist and its resolved tracks.
pub fn playlist_container(playlist: &Playlist, tracks: &[Track]) -> Container {
    Container {
        kind: ContainerKind::Playlist,
        id: playlist.id.to_string(),
        title: playlist.title.clone(),
        tracks: tracks.iter().map(player_track).collect(),
    }
}

/// Card for a track, tagged with its originating container.
pub fn track_card(track: &Track, container: Option<Container>) -> Card {
    Card {
        kind: CardKind::Track,
        title: track.title.clone(),
        subtitle: format!("{} · {}", track.artist, track.duration_formatted()),
        image_url: track.cover_url.clone(),
        action: CardAction::PlayTrack {
            track: track.clone(),
            container,
        },
    }
}

/// Card for an album.
pub fn album_card(album: &Album) -> Card {
    Card {
        kind: CardKind::Album,
        title: album.title.clone(),
        subtitle: album.artist_name.clone(),
        image_url: album.cover_url.clone(),
        action: CardAction::OpenAlbum {
            id: album.id.clone(),
        },
    }
}

/// Card for an artist. The archive catalog has no artist ids; the name is
/// the identifier there.
pub fn artist_card(artist: &Artist) -> Card {
    let id = artist.id.clone().unwrap_or_else(|| artist.name.clone());
    Card {
        kind: CardKind::Artist,
        title: artist.name.clone(),
        subtitle: String::new(),
        image_url: artist.image_url.clone(),
        action: CardAction::OpenArtist { id },
    }
}

/// Card for a playlist in the library list.
pub fn playlist_card(playlist: &Playlist, cover_path: Option<String>) -> Card {
    let count = playlist.track_keys.len();
    Card {
        kind: CardKind::Playlist,
        title: playlist.title.clone(),
        subtitle: if count == 1 {
            "1 track".to_string()
        } else {
            format!("{count} tracks")
        },
        image_url: cover_path,
        action: CardAction::OpenPlaylist { id: playlist.id },
    }
}

/// Card for a listener in the admin ban list.
pub fn listener_card(listener: &Listener, picture_path: Option<String>) -> Card {
    Card {
        kind: CardKind::Listener,
        title: listener.name.clone(),
        subtitle: if listener.banned {
            format!("{} · banned", listener.email)
        } else {
            listener.email.clone()
        },
        image_url: picture_path,
        action: CardAction::ToggleBan {
            listener_id: listener.id,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadenza_core::TrackKey;
    use std::time::Duration;

    fn sample_track(key: &str) -> Track {
        Track {
            id: TrackKey::from_raw(key),
            title: format!("Track {key}"),
            artist: "Artist".to_string(),
            artist_id: None,
            album: Some("Album".to_string()),
            album_id: Some("a1".to_string()),
            cover_url: Some("http://img/a1".to_string()),
            stream_url: Some(format!("http://stream/{key}")),
            duration: Some(Duration::from_secs(245)),
            genre: None,
            track_number: None,
        }
    }

    #[test]
    fn track_card_carries_its_container() {
        let album = Album {
            id: "a1".to_string(),
            title: "Album".to_string(),
            artist_name: "Artist".to_string(),
            artist_id: None,
            cover_url: None,
            release_date: None,
            tracks: vec![sample_track("1"), sample_track("2")],
        };

        let card = track_card(&album.tracks[0], Some(album_container(&album)));
        assert_eq!(card.subtitle, "Artist · 4:05");

        match card.action {
            CardAction::PlayTrack { track, container } => {
                assert_eq!(track.id.as_str(), "1");
                let container = container.unwrap();
                assert_eq!(container.kind, ContainerKind::Album);
                assert_eq!(container.tracks.len(), 2);
            }
            _ => panic!("expected a play action"),
        }
    }

    #[test]
    fn artist_card_falls_back_to_name_as_id() {
        let artist = Artist::named("Grateful Dead");
        let card = artist_card(&artist);
        match card.action {
            CardAction::OpenArtist { id } => assert_eq!(id, "Grateful Dead"),
            _ => panic!("expected an open-artist action"),
        }
    }
}
