//! Error types for playback

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The selected track has no stream URL to open
    #[error("No stream URL for track: {0}")]
    MissingStreamUrl(String),

    /// The decoder could not open the stream
    #[error("Decoder error: {0}")]
    DecoderOpen(String),

    /// Seeking failed or the position is out of range
    #[error("Invalid seek position: {0:?}")]
    InvalidSeekPosition(std::time::Duration),

    /// Audio source error
    #[error("Audio source error: {0}")]
    AudioSource(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
