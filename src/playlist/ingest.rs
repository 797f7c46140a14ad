use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::*;

use crate::config::LibrarySettings;

use super::display::display_name;
use super::expand::expand_items;
use super::media_type::is_audio;
use super::model::{MediaRef, Playlist, Track};

/// Outcome of one ingestion batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested {
    /// Playlist indices of the appended tracks.
    pub added: Range<usize>,
    /// Items dropped because they were not audio.
    pub skipped: usize,
}

impl Ingested {
    pub fn count(&self) -> usize {
        self.added.len()
    }
}

fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    let d = tagged.properties().duration();
    (!d.is_zero()).then_some(d)
}

fn make_track(path: PathBuf) -> Track {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let duration = probe_duration(&path);
    Track {
        display_name: display_name(&name),
        media: MediaRef::new(path),
        duration,
    }
}

/// Append the audio items of a dropped/opened batch to `playlist`.
///
/// Directories are expanded first; everything whose media type is not
/// `audio/*` is skipped without complaint. Accepted items keep their relative
/// order.
pub fn ingest<I>(playlist: &mut Playlist, items: I, settings: &LibrarySettings) -> Ingested
where
    I: IntoIterator<Item = PathBuf>,
{
    let start = playlist.len();
    let mut skipped = 0;

    for path in expand_items(items, settings) {
        if !is_audio(&path) {
            tracing::debug!(path = %path.display(), "skipping non-audio item");
            skipped += 1;
            continue;
        }
        playlist.push(make_track(path));
    }

    let added = start..playlist.len();
    if !added.is_empty() {
        tracing::info!(count = added.len(), skipped, "added tracks to playlist");
    }
    Ingested { added, skipped }
}
