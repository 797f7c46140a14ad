//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the playlist, the playback
//! order and the animated widgets' state.

mod model;

pub use model::*;
