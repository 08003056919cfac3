//! Playback controller - core orchestration.
//!
//! Owns the single live audio source, the listening history, and the
//! container continuation policy. At most one stream is active: selecting
//! a track implicitly stops the current one first.

use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::history::ListeningHistory;
use crate::source::{AudioSource, StreamOpener};
use crate::types::{Container, PlayerState, PlayerTrack};
use crate::volume::Volume;
use std::time::Duration;

/// "Previous" below this elapsed time steps back in history; at or past
/// it, the current track rewinds to zero instead.
pub const REWIND_THRESHOLD: Duration = Duration::from_secs(3);

/// Playback/history controller.
pub struct PlayerController {
    opener: Box<dyn StreamOpener>,

    state: PlayerState,
    source: Option<Box<dyn AudioSource>>,
    current: Option<PlayerTrack>,

    /// Container association attached at selection time; continuation
    /// walks its track order.
    container: Option<Container>,

    history: ListeningHistory,
    volume: Volume,

    pending_events: Vec<PlaybackEvent>,
}

impl PlayerController {
    /// Create a controller over a platform stream opener.
    pub fn new(opener: Box<dyn StreamOpener>) -> Self {
        Self {
            opener,
            state: PlayerState::Idle,
            source: None,
            current: None,
            container: None,
            history: ListeningHistory::new(),
            volume: Volume::default(),
            pending_events: Vec::new(),
        }
    }

    // --- selection ------------------------------------------------------

    /// Select a track for playback, replacing any current stream.
    ///
    /// `container` is the explicit playback context the track came from
    /// (album or playlist, with its track order); `None` for a bare
    /// search result, in which case playback stops at the track's end.
    pub fn select(&mut self, track: PlayerTrack, container: Option<Container>) -> Result<()> {
        self.container = container;
        self.start(track, true)
    }

    fn start(&mut self, track: PlayerTrack, record: bool) -> Result<()> {
        self.drop_source();

        let Some(url) = track.stream_url.clone() else {
            self.set_state(PlayerState::Idle);
            self.pending_events.push(PlaybackEvent::Error {
                message: format!("No stream available for \"{}\"", track.title),
            });
            return Err(PlaybackError::MissingStreamUrl(track.title));
        };

        let mut source = match self.opener.open(&url) {
            Ok(source) => source,
            Err(err) => {
                self.set_state(PlayerState::Idle);
                self.pending_events.push(PlaybackEvent::Error {
                    message: format!("Could not play \"{}\"", track.title),
                });
                return Err(err);
            }
        };

        source.set_volume(self.volume.level());
        source.play();

        let previous_key = self.current.as_ref().map(|t| t.key.clone());
        if record {
            self.history.record(track.clone());
        }

        self.pending_events.push(PlaybackEvent::TrackChanged {
            key: track.key.clone(),
            previous_key,
        });

        self.current = Some(track);
        self.source = Some(source);
        self.set_state(PlayerState::Playing);
        Ok(())
    }

    // --- transport ------------------------------------------------------

    /// Toggle between playing and paused. No-op when idle.
    pub fn toggle(&mut self) {
        match self.state {
            PlayerState::Playing => {
                if let Some(source) = self.source.as_mut() {
                    source.pause();
                }
                self.set_state(PlayerState::Paused);
            }
            PlayerState::Paused => {
                if let Some(source) = self.source.as_mut() {
                    source.play();
                }
                self.set_state(PlayerState::Playing);
            }
            PlayerState::Idle => {}
        }
    }

    /// Stop playback and return to idle. History and container stay.
    pub fn stop(&mut self) {
        self.drop_source();
        self.set_state(PlayerState::Idle);
    }

    /// The "previous" control.
    ///
    /// Under [`REWIND_THRESHOLD`] of elapsed time with a prior history
    /// entry, the cursor steps back and that entry replays; otherwise the
    /// current track rewinds to zero without consuming a history step.
    pub fn previous(&mut self) -> Result<()> {
        let Some(position) = self.source.as_ref().map(|s| s.position()) else {
            return Ok(());
        };

        if position < REWIND_THRESHOLD {
            if let Some(track) = self.history.step_back().cloned() {
                return self.start(track, false);
            }
        }

        self.seek(Duration::ZERO)
    }

    /// The "next" control: unconsumed forward history replays first,
    /// otherwise continuation walks the active container.
    pub fn next(&mut self) -> Result<()> {
        if self.source.is_none() {
            return Ok(());
        }

        if let Some(track) = self.history.step_forward().cloned() {
            return self.start(track, false);
        }

        self.advance_in_container()
    }

    /// Poll for natural end-of-stream; drive this from the render loop.
    ///
    /// When the decoder reports the track finished, continuation picks the
    /// next track of the active container, or playback returns to idle at
    /// the container's end (never loops).
    pub fn tick(&mut self) -> Result<()> {
        if self.state != PlayerState::Playing {
            return Ok(());
        }
        if !self.source.as_ref().is_some_and(|s| s.is_finished()) {
            return Ok(());
        }

        if let Some(track) = &self.current {
            self.pending_events.push(PlaybackEvent::TrackFinished {
                key: track.key.clone(),
            });
        }

        self.advance_in_container()
    }

    fn advance_in_container(&mut self) -> Result<()> {
        let next = self
            .container
            .as_ref()
            .zip(self.current.as_ref())
            .and_then(|(container, current)| container.track_after(&current.key))
            .cloned();

        match next {
            Some(track) => self.start(track, true),
            None => {
                self.stop();
                Ok(())
            }
        }
    }

    // --- position and volume -------------------------------------------

    /// Seek within the current track.
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        match self.source.as_mut() {
            Some(source) => source.seek(position),
            None => Err(PlaybackError::NoTrackLoaded),
        }
    }

    /// Current playback position, when a stream is loaded.
    pub fn position(&self) -> Option<Duration> {
        self.source.as_ref().map(|s| s.position())
    }

    /// Duration of the loaded stream, preferring the decoder's value.
    pub fn duration(&self) -> Option<Duration> {
        self.source
            .as_ref()
            .and_then(|s| s.duration())
            .or_else(|| self.current.as_ref().and_then(|t| t.duration))
    }

    /// Set the output volume (0.0–1.0).
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set(level);
        self.apply_volume();
    }

    /// Mute, or restore the pre-mute level.
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        if let Some(source) = self.source.as_mut() {
            source.set_volume(self.volume.level());
        }
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            muted: self.volume.is_muted(),
        });
    }

    // --- observers ------------------------------------------------------

    /// Current state.
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// The loaded track, if any.
    pub fn current_track(&self) -> Option<&PlayerTrack> {
        self.current.as_ref()
    }

    /// The active container association, if any.
    pub fn container(&self) -> Option<&Container> {
        self.container.as_ref()
    }

    /// The listening history.
    pub fn history(&self) -> &ListeningHistory {
        &self.history
    }

    /// Current volume level.
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Drain all pending events since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // --- internals ------------------------------------------------------

    fn drop_source(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.stop();
        }
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state != state {
            self.state = state;
            self.pending_events
                .push(PlaybackEvent::StateChanged { state });
        }
    }
}
