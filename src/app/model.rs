//! Application model types: `App`, `PlaybackState` and `InputMode`.
//!
//! `App` is owned by the UI thread and holds the playlist, the playback order,
//! the visualizer and the title marquee. Nothing in here talks to the audio
//! device; that goes through `transport` and a `PlaybackBackend`.

use std::time::Instant;

use ratatui::text::Line;

use crate::audio::Progress;
use crate::config::Settings;
use crate::order::PlaybackOrder;
use crate::playlist::{Playlist, Track};
use crate::title_scroll::TitleScroller;
use crate::visualizer::Visualizer;

/// Shown in the title slot until a track is loaded.
pub const NO_TRACK_TITLE: &str = "Drop audio files here";

/// The playback state of the application.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// What keystrokes currently edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing paths into the open prompt.
    Open { input: String },
}

/// The main application model.
pub struct App {
    pub playlist: Playlist,
    pub order: PlaybackOrder,
    pub visualizer: Visualizer,
    pub title: TitleScroller,
    /// Highlighted row of the playlist view.
    pub selected: usize,
    pub input: InputMode,
    /// One-line message shown in the footer.
    pub status: Option<String>,
    /// Last progress sampled from the backend.
    pub progress: Progress,
    pub autoplay_on_first_add: bool,
    /// Playlist index whose cover the header shows.
    pub cover: Option<usize>,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let mut order = PlaybackOrder::new();
        if settings.playback.shuffle {
            order.toggle_shuffle(0);
        }
        if settings.playback.repeat_one {
            order.toggle_repeat_one();
        }

        Self {
            playlist: Playlist::new(),
            order,
            visualizer: Visualizer::new(settings.visualizer.clone()),
            title: TitleScroller::new(&settings.title),
            selected: 0,
            input: InputMode::Normal,
            status: None,
            progress: Progress::default(),
            autoplay_on_first_add: settings.playback.autoplay_on_first_add,
            cover: None,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.playlist.is_empty()
    }

    pub fn playback(&self) -> PlaybackState {
        match (self.order.current(), self.order.is_playing()) {
            (None, _) => PlaybackState::Stopped,
            (Some(_), true) => PlaybackState::Playing,
            (Some(_), false) => PlaybackState::Paused,
        }
    }

    /// The loaded track, if any.
    pub fn now_playing(&self) -> Option<&Track> {
        self.order.current().and_then(|i| self.playlist.get(i))
    }

    pub fn title_text(&self) -> &str {
        self.now_playing()
            .map(|t| t.display_name.as_str())
            .unwrap_or(NO_TRACK_TITLE)
    }

    /// Re-measure the title against the current container and restart the marquee.
    pub fn show_title(&mut self, now: Instant) {
        let width = text_width(self.title_text());
        let container = self.title.container_width();
        self.title.show(width, container, now);
    }

    pub fn set_selected(&mut self, idx: usize) {
        if idx < self.playlist.len() {
            self.selected = idx;
        }
    }

    /// Move the highlight down one row, stopping at the last track.
    pub fn next(&mut self) {
        if self.selected + 1 < self.playlist.len() {
            self.selected += 1;
        }
    }

    /// Move the highlight up one row, stopping at the first track.
    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.playlist.len().saturating_sub(1);
    }

    pub fn enter_open_mode(&mut self) {
        self.input = InputMode::Open {
            input: String::new(),
        };
    }

    pub fn is_open_mode(&self) -> bool {
        matches!(self.input, InputMode::Open { .. })
    }

    pub fn push_input_char(&mut self, c: char) {
        if let InputMode::Open { input } = &mut self.input {
            input.push(c);
        }
    }

    pub fn push_input_str(&mut self, s: &str) {
        if let InputMode::Open { input } = &mut self.input {
            input.push_str(s);
        }
    }

    pub fn pop_input_char(&mut self) {
        if let InputMode::Open { input } = &mut self.input {
            input.pop();
        }
    }

    pub fn cancel_input(&mut self) {
        self.input = InputMode::Normal;
    }

    /// Leave the open prompt, returning what was typed.
    pub fn take_input(&mut self) -> Option<String> {
        match std::mem::take(&mut self.input) {
            InputMode::Open { input } => Some(input),
            InputMode::Normal => None,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }
}

/// Display width of `text` in terminal columns.
pub fn text_width(text: &str) -> u16 {
    u16::try_from(Line::raw(text).width()).unwrap_or(u16::MAX)
}
