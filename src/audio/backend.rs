use std::time::Duration;

use crate::playlist::MediaRef;
use crate::visualizer::FrequencySource;

/// What the transport needs from an audio output.
///
/// A freshly loaded track is paused at position zero until `play` is called.
pub trait PlaybackBackend {
    /// Point the backend at `media`, replacing whatever was loaded.
    fn load(&mut self, media: &MediaRef) -> anyhow::Result<()>;
    fn play(&mut self);
    fn pause(&mut self);
    /// Reload the current track from the start, paused.
    fn restart(&mut self) -> anyhow::Result<()>;
    fn seek(&mut self, position: Duration);
    fn position(&self) -> Duration;
    /// Length of the loaded track, when the decoder or the tags know it.
    fn duration(&self) -> Option<Duration>;
    fn is_loaded(&self) -> bool;
    /// The loaded track has played to its end.
    fn has_ended(&self) -> bool;
    /// Live spectrum of whatever this backend plays.
    fn frequency_source(&self) -> Box<dyn FrequencySource>;
}
