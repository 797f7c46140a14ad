//! Audio output: decoding, the playback backend and the analyser tap.
//!
//! `AudioPlayer` owns the rodio output stream and one sink per loaded track.
//! Every decoded source is wrapped in a `TappedSource`, which copies what the
//! mixer actually plays into a shared ring buffer read by the visualizer.

mod backend;
mod player;
mod sink;
mod tap;
mod types;

pub use backend::PlaybackBackend;
pub use player::AudioPlayer;
pub use tap::{SharedTap, TapBuffer, TappedSource};
pub use types::Progress;
