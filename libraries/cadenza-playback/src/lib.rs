//! Cadenza Playback
//!
//! Platform-agnostic playback management: the play/pause state machine,
//! the listening history with its prev/next cursor, and the continuation
//! policy that walks the active album or playlist when a track ends.
//!
//! # Architecture
//!
//! This crate has no audio backend and no async runtime. Platform code
//! supplies a [`StreamOpener`] that turns a stream URL into an
//! [`AudioSource`]; a presentation layer drains [`PlaybackEvent`]s instead
//! of the controller touching any widget.
//!
//! # Example
//!
//! ```rust,no_run
//! use cadenza_playback::{PlayerController, PlayerTrack, StreamOpener};
//!
//! # fn opener() -> Box<dyn StreamOpener> { unimplemented!() }
//! let mut player = PlayerController::new(opener());
//!
//! let track = PlayerTrack {
//!     key: "item/01 Intro.mp3".to_string(),
//!     title: "Intro".to_string(),
//!     artist: "Artist".to_string(),
//!     album: None,
//!     stream_url: Some("https://archive.org/download/item/01%20Intro.mp3".into()),
//!     duration: None,
//! };
//!
//! player.select(track, None).ok();
//! player.toggle();        // pause
//! player.toggle();        // resume
//! for event in player.drain_events() {
//!     // update now-playing UI
//!     let _ = event;
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod controller;
mod error;
mod events;
mod history;
mod source;
mod types;
mod volume;

pub use controller::{PlayerController, REWIND_THRESHOLD};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use history::ListeningHistory;
pub use source::{AudioSource, StreamOpener};
pub use types::{Container, ContainerKind, PlayerState, PlayerTrack};
pub use volume::Volume;
