//! Playback order engine: current index, shuffle permutation and repeat flag.
//!
//! The engine only computes indices. Loading the chosen track is the
//! transport's job, which reports the choice back through `select_index`.

use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;

/// Transport-visible playback flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackCursor {
    /// Loaded track, if any. Always a valid playlist index.
    pub current: Option<usize>,
    pub playing: bool,
    pub shuffle: bool,
    pub repeat_one: bool,
}

/// A permutation of playlist indices and the cursor's place in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShuffleState {
    pub order: Vec<usize>,
    /// `None` sits before the first entry, so the next advance yields `order[0]`.
    pub position: Option<usize>,
}

pub struct PlaybackOrder<R: Rng = ThreadRng> {
    cursor: PlaybackCursor,
    shuffle: ShuffleState,
    rng: R,
}

impl PlaybackOrder {
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for PlaybackOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PlaybackOrder<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            cursor: PlaybackCursor::default(),
            shuffle: ShuffleState::default(),
            rng,
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.cursor.current
    }

    pub fn is_playing(&self) -> bool {
        self.cursor.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.cursor.playing = playing;
    }

    pub fn is_shuffle(&self) -> bool {
        self.cursor.shuffle
    }

    pub fn is_repeat_one(&self) -> bool {
        self.cursor.repeat_one
    }

    #[cfg(test)]
    pub fn shuffle_state(&self) -> &ShuffleState {
        &self.shuffle
    }

    /// Make `index` the loaded track. Out-of-range indices are ignored.
    pub fn select_index(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        self.cursor.current = Some(index);
        if self.cursor.shuffle {
            self.sync_position();
        }
        true
    }

    /// Index of the track after the current one, or `None` for an empty playlist.
    pub fn advance(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if !self.cursor.shuffle {
            return Some(self.cursor.current.map_or(0, |c| (c + 1) % len));
        }

        if self.shuffle.order.len() != len {
            self.regenerate(len);
        }
        let next = self.shuffle.position.map_or(0, |p| p + 1);
        if next >= self.shuffle.order.len() {
            self.regenerate(len);
            self.shuffle.position = Some(0);
        } else {
            self.shuffle.position = Some(next);
        }
        self.shuffle.position.map(|p| self.shuffle.order[p])
    }

    /// Index of the track before the current one, or `None` for an empty playlist.
    pub fn retreat(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if !self.cursor.shuffle {
            return Some(self.cursor.current.map_or(len - 1, |c| (c + len - 1) % len));
        }

        if self.shuffle.order.len() != len {
            self.regenerate(len);
        }
        let prev = match self.shuffle.position {
            Some(p) if p > 0 => p - 1,
            _ => self.shuffle.order.len() - 1,
        };
        self.shuffle.position = Some(prev);
        Some(self.shuffle.order[prev])
    }

    pub fn toggle_shuffle(&mut self, len: usize) {
        self.cursor.shuffle = !self.cursor.shuffle;
        if self.cursor.shuffle {
            self.regenerate(len);
        }
        tracing::debug!(shuffle = self.cursor.shuffle, "shuffle toggled");
    }

    pub fn toggle_repeat_one(&mut self) {
        self.cursor.repeat_one = !self.cursor.repeat_one;
    }

    /// Draw a fresh uniform permutation of `0..len` and anchor it at the current index.
    pub fn regenerate(&mut self, len: usize) {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut self.rng);
        self.shuffle.order = order;
        self.sync_position();
    }

    // O(n) lookup of the current index inside the permutation.
    fn sync_position(&mut self) {
        self.shuffle.position = self
            .cursor
            .current
            .and_then(|c| self.shuffle.order.iter().position(|&i| i == c));
    }
}
