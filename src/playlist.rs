//! Playlist model and ingestion of dropped or opened files.
//!
//! Tracks only ever get appended, so indices handed out to the order engine
//! stay valid for the whole session.

mod display;
mod expand;
mod ingest;
mod media_type;
mod model;
mod paste;

pub use display::display_name;
pub use ingest::{Ingested, ingest};
pub use media_type::{is_audio, media_type};
pub use model::{MediaRef, Playlist, Track};
pub use paste::dropped_paths;
