//! Rodio-backed stream opener.
//!
//! Fetches the stream body over HTTP into memory and hands it to rodio
//! for decoding, one sink per track. The output stream is opened once and
//! intentionally leaked: dropping it would silence every subsequent sink.

use cadenza_playback::{AudioSource, PlaybackError, StreamOpener};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::time::Duration;
use tracing::debug;

pub struct HttpStreamOpener {
    handle: OutputStreamHandle,
    http: reqwest::blocking::Client,
}

impl HttpStreamOpener {
    /// Open the default audio output device.
    pub fn new() -> anyhow::Result<Self> {
        let (stream, handle) = OutputStream::try_default()?;
        // Keep the device connection alive for the process lifetime.
        std::mem::forget(stream);

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { handle, http })
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, PlaybackError> {
        let get = || -> reqwest::Result<Vec<u8>> {
            Ok(self
                .http
                .get(url)
                .send()?
                .error_for_status()?
                .bytes()?
                .to_vec())
        };

        // reqwest's blocking client refuses to run on an async worker
        // thread unless the runtime is told we are about to block.
        let result = match tokio::runtime::Handle::try_current() {
            Ok(_) => tokio::task::block_in_place(get),
            Err(_) => get(),
        };

        result.map_err(|err| PlaybackError::DecoderOpen(err.to_string()))
    }
}

impl StreamOpener for HttpStreamOpener {
    fn open(&self, url: &str) -> Result<Box<dyn AudioSource>, PlaybackError> {
        debug!(url, "opening stream");
        let bytes = self.fetch_bytes(url)?;

        let decoder = Decoder::new(Cursor::new(bytes))
            .map_err(|err| PlaybackError::DecoderOpen(err.to_string()))?;
        let duration = decoder.total_duration();

        let sink = Sink::try_new(&self.handle)
            .map_err(|err| PlaybackError::AudioSource(err.to_string()))?;
        sink.pause();
        sink.append(decoder);

        Ok(Box::new(RodioSource { sink, duration }))
    }
}

struct RodioSource {
    sink: Sink,
    duration: Option<Duration>,
}

impl AudioSource for RodioSource {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn stop(&mut self) {
        self.sink.stop();
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlaybackError> {
        self.sink
            .try_seek(position)
            .map_err(|err| PlaybackError::AudioSource(err.to_string()))
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }
}
