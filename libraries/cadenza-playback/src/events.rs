//! Playback events.
//!
//! The controller queues events; a presentation layer drains them with
//! [`crate::PlayerController::drain_events`] and renders the now-playing
//! state from what it reads. Transport logic never touches a widget.

use crate::types::PlayerState;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed (idle/playing/paused)
    StateChanged {
        /// The new state
        state: PlayerState,
    },

    /// A different track started playing
    TrackChanged {
        /// Key of the new track
        key: String,
        /// Key of the previous track, if any
        previous_key: Option<String>,
    },

    /// The current track reached natural end-of-stream
    TrackFinished {
        /// Key of the finished track
        key: String,
    },

    /// Volume or mute state changed
    VolumeChanged {
        /// New level (0.0–1.0)
        level: f32,
        /// Whether output is muted
        muted: bool,
    },

    /// A user-visible playback problem (missing stream URL, decoder
    /// failure); playback is left idle
    Error {
        /// Message for the notice surface
        message: String,
    },
}
