//! Settings for playback defaults, the visualizer, the title marquee, the
//! UI, directory expansion and logging.
//!
//! Values come from struct defaults, an optional TOML file and `LILT__*`
//! environment variables, in increasing order of precedence.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;

#[cfg(test)]
mod tests;
