//! Platform audio abstraction.
//!
//! The controller never talks to a decoder directly: platform code
//! provides a [`StreamOpener`] that resolves a stream URL into a live
//! [`AudioSource`]. Desktop uses a rodio-backed implementation; tests use
//! scripted fakes.

use crate::error::Result;
use std::time::Duration;

/// An open, decodable audio stream.
pub trait AudioSource: Send {
    /// Start or resume output.
    fn play(&mut self);

    /// Pause output, keeping the position.
    fn pause(&mut self);

    /// Stop output and release the stream.
    fn stop(&mut self);

    /// Set output volume (0.0–1.0).
    fn set_volume(&mut self, volume: f32);

    /// Seek to an absolute position.
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Current playback position.
    fn position(&self) -> Duration;

    /// Total stream duration, when the decoder knows it.
    fn duration(&self) -> Option<Duration>;

    /// Whether the decoder reached natural end-of-stream.
    fn is_finished(&self) -> bool;
}

/// Opens stream URLs as audio sources.
pub trait StreamOpener: Send {
    /// Open a decoder over the given stream URL.
    fn open(&self, url: &str) -> Result<Box<dyn AudioSource>>;
}
