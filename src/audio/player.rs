use std::time::Duration;

use anyhow::Context;
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::VisualizerSettings;
use crate::playlist::MediaRef;
use crate::visualizer::{Analyser, FrequencySource};

use super::backend::PlaybackBackend;
use super::sink::create_sink;
use super::tap::{SharedTap, TapBuffer};

struct Loaded {
    media: MediaRef,
    sink: Sink,
    duration: Option<Duration>,
}

/// rodio-backed playback of one track at a time.
pub struct AudioPlayer {
    stream: OutputStream,
    tap: SharedTap,
    analyser: VisualizerSettings,
    loaded: Option<Loaded>,
}

impl AudioPlayer {
    /// Open the default output device.
    pub fn new(analyser: VisualizerSettings) -> anyhow::Result<Self> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .context("no audio output device available")?;
        // rodio reports the drop on stderr, which would land on top of the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            tap: TapBuffer::shared(analyser.fft_size),
            analyser,
            loaded: None,
        })
    }

    fn clear_tap(&self) {
        if let Ok(mut tap) = self.tap.lock() {
            tap.clear();
        }
    }
}

impl PlaybackBackend for AudioPlayer {
    fn load(&mut self, media: &MediaRef) -> anyhow::Result<()> {
        if let Some(old) = self.loaded.take() {
            old.sink.stop();
        }
        self.clear_tap();

        let (sink, duration) = create_sink(&self.stream, media, self.tap.clone())?;
        tracing::debug!(path = %media.path().display(), ?duration, "loaded track");
        self.loaded = Some(Loaded {
            media: media.clone(),
            sink,
            duration,
        });
        Ok(())
    }

    fn play(&mut self) {
        if let Some(l) = &self.loaded {
            l.sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(l) = &self.loaded {
            l.sink.pause();
        }
        self.clear_tap();
    }

    fn restart(&mut self) -> anyhow::Result<()> {
        let media = self
            .loaded
            .as_ref()
            .map(|l| l.media.clone())
            .context("no track loaded")?;
        self.load(&media)
    }

    fn seek(&mut self, position: Duration) {
        let Some(l) = &self.loaded else {
            return;
        };
        if let Err(e) = l.sink.try_seek(position) {
            tracing::warn!(error = %e, ?position, "seek failed");
        }
    }

    fn position(&self) -> Duration {
        self.loaded
            .as_ref()
            .map(|l| l.sink.get_pos())
            .unwrap_or(Duration::ZERO)
    }

    fn duration(&self) -> Option<Duration> {
        self.loaded.as_ref().and_then(|l| l.duration)
    }

    fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    fn has_ended(&self) -> bool {
        self.loaded.as_ref().is_some_and(|l| l.sink.empty())
    }

    fn frequency_source(&self) -> Box<dyn FrequencySource> {
        Box::new(Analyser::new(self.tap.clone(), &self.analyser))
    }
}
