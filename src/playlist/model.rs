use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Handle to the playable bytes behind a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    path: PathBuf,
}

impl MediaRef {
    /// Build a reference, resolving `path` against the working directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path = std::path::absolute(&path).unwrap_or(path);
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a buffered reader over the media.
    pub fn open(&self) -> io::Result<BufReader<File>> {
        File::open(&self.path).map(BufReader::new)
    }

    /// `file://` URL, as published over MPRIS.
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    /// File name without its last extension.
    pub display_name: String,
    pub media: MediaRef,
    /// Container duration probed at ingestion, if the tags could be read.
    pub duration: Option<Duration>,
}

/// Append-only list of tracks in display order.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }
}
