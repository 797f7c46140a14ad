use std::path::PathBuf;
use std::time::Instant;

use crate::app::App;
use crate::audio::PlaybackBackend;
use crate::config;
use crate::transport;

/// Ingest the paths given on the command line, as if they had been dropped.
pub fn ingest_cli_files(
    app: &mut App,
    backend: &mut dyn PlaybackBackend,
    files: Vec<PathBuf>,
    settings: &config::Settings,
) {
    if files.is_empty() {
        return;
    }
    let requested = files.len();
    let got = transport::ingest(app, backend, files, &settings.library, Instant::now());
    tracing::info!(
        requested,
        added = got.count(),
        skipped = got.skipped,
        "ingested command-line paths"
    );
}
