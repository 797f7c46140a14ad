//! Transport: turns user and media events into order-engine moves and backend calls.
//!
//! Every function here runs on the UI thread with the `App` and the backend
//! borrowed for the duration of one event.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::app::App;
use crate::audio::{PlaybackBackend, Progress};
use crate::config::LibrarySettings;
use crate::playlist::{self, Ingested};

/// Point the backend at playlist entry `index`, optionally starting playback.
///
/// Returns `false` when the index is out of range or the track cannot be
/// opened. An unplayable track stays selected in a not-playing state.
pub fn load(
    app: &mut App,
    backend: &mut dyn PlaybackBackend,
    index: usize,
    autoplay: bool,
    now: Instant,
) -> bool {
    let Some(track) = app.playlist.get(index) else {
        return false;
    };
    let media = track.media.clone();
    let name = track.display_name.clone();

    app.order.select_index(index, app.playlist.len());
    app.order.set_playing(false);
    app.set_selected(index);
    app.progress = Progress::default();
    app.show_title(now);
    app.cover = Some(index);

    if let Err(e) = backend.load(&media) {
        tracing::warn!(index, error = %format!("{e:#}"), "cannot play track");
        app.set_status(format!("Cannot play {name}"));
        return false;
    }
    tracing::info!(index, path = %media.path().display(), "now playing");
    app.status = None;

    if autoplay {
        start_playback(app, backend);
    }
    true
}

fn start_playback(app: &mut App, backend: &mut dyn PlaybackBackend) {
    app.visualizer
        .ensure_initialized(|| backend.frequency_source());
    backend.play();
    app.order.set_playing(true);
    app.visualizer.start();
}

/// Toggle between playing and paused. Does nothing while no track is loaded.
pub fn play_pause(app: &mut App, backend: &mut dyn PlaybackBackend) {
    if !backend.is_loaded() {
        return;
    }
    if app.order.is_playing() {
        backend.pause();
        app.order.set_playing(false);
    } else {
        start_playback(app, backend);
    }
}

pub fn play(app: &mut App, backend: &mut dyn PlaybackBackend) {
    if backend.is_loaded() && !app.order.is_playing() {
        start_playback(app, backend);
    }
}

pub fn pause(app: &mut App, backend: &mut dyn PlaybackBackend) {
    if app.order.is_playing() {
        backend.pause();
        app.order.set_playing(false);
    }
}

pub fn next(app: &mut App, backend: &mut dyn PlaybackBackend, now: Instant) {
    if let Some(i) = app.order.advance(app.playlist.len()) {
        load(app, backend, i, true, now);
    }
}

pub fn prev(app: &mut App, backend: &mut dyn PlaybackBackend, now: Instant) {
    if let Some(i) = app.order.retreat(app.playlist.len()) {
        load(app, backend, i, true, now);
    }
}

/// Load and play the highlighted playlist row.
pub fn play_selected(app: &mut App, backend: &mut dyn PlaybackBackend, now: Instant) {
    if app.has_tracks() {
        let index = app.selected;
        load(app, backend, index, true, now);
    }
}

/// The loaded track played to its end: repeat it or move on.
pub fn on_track_ended(app: &mut App, backend: &mut dyn PlaybackBackend, now: Instant) {
    if app.order.is_repeat_one() {
        match backend.restart() {
            Ok(()) => start_playback(app, backend),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "cannot restart track");
                app.order.set_playing(false);
            }
        }
        return;
    }
    next(app, backend, now);
}

/// Check the backend for a finished track. Returns `true` when one was handled.
pub fn poll_ended(app: &mut App, backend: &mut dyn PlaybackBackend, now: Instant) -> bool {
    if app.order.is_playing() && backend.has_ended() {
        on_track_ended(app, backend, now);
        return true;
    }
    false
}

/// Jump to `fraction` (0..=1) of the loaded track. No-op while its length is unknown.
pub fn seek_fraction(app: &mut App, backend: &mut dyn PlaybackBackend, fraction: f64) {
    let Some(total) = duration(app, backend) else {
        return;
    };
    if total.is_zero() || !fraction.is_finite() {
        return;
    }
    let target = total.mul_f64(fraction.clamp(0.0, 1.0));
    backend.seek(target);
    app.progress = Progress {
        position: target,
        duration: Some(total),
    };
}

fn duration(app: &App, backend: &dyn PlaybackBackend) -> Option<Duration> {
    backend
        .duration()
        .or_else(|| app.now_playing().and_then(|t| t.duration))
}

/// Sample position and length from the backend into `app.progress`.
pub fn update_progress(app: &mut App, backend: &dyn PlaybackBackend) -> Progress {
    app.progress = if backend.is_loaded() {
        Progress {
            position: backend.position(),
            duration: duration(app, backend),
        }
    } else {
        Progress::default()
    };
    app.progress
}

pub fn toggle_shuffle(app: &mut App) {
    app.order.toggle_shuffle(app.playlist.len());
}

pub fn toggle_repeat(app: &mut App) {
    app.order.toggle_repeat_one();
}

/// Append a dropped or opened batch to the playlist.
///
/// The first tracks to land in an empty playlist are selected and loaded
/// straight away.
pub fn ingest(
    app: &mut App,
    backend: &mut dyn PlaybackBackend,
    items: Vec<PathBuf>,
    library: &LibrarySettings,
    now: Instant,
) -> Ingested {
    let was_empty = app.playlist.is_empty();
    let ingested = playlist::ingest(&mut app.playlist, items, library);
    if ingested.count() == 0 {
        if ingested.skipped > 0 {
            app.set_status("No audio files found");
        }
        return ingested;
    }

    if app.order.is_shuffle() {
        app.order.regenerate(app.playlist.len());
    }
    if was_empty {
        let autoplay = app.autoplay_on_first_add;
        load(app, backend, 0, autoplay, now);
    } else {
        app.set_status(format!("Added {} track(s)", ingested.count()));
    }
    ingested
}

/// Ingest a pasted payload or a line typed at the open prompt.
pub fn ingest_text(
    app: &mut App,
    backend: &mut dyn PlaybackBackend,
    text: &str,
    library: &LibrarySettings,
    now: Instant,
) -> Ingested {
    let paths = playlist::dropped_paths(text);
    tracing::debug!(count = paths.len(), "paths received");
    ingest(app, backend, paths, library, now)
}

#[cfg(test)]
mod tests;
