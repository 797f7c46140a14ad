use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/lilt/config.toml` or `~/.config/lilt/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LILT__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub visualizer: VisualizerSettings,
    pub title: TitleSettings,
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Whether repeat-one starts enabled.
    pub repeat_one: bool,
    /// Start playing as soon as the first tracks land in an empty playlist.
    pub autoplay_on_first_add: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            repeat_one: false,
            autoplay_on_first_add: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualizerSettings {
    /// Number of frequency bands drawn across the curve.
    pub bands: usize,
    /// Lowest band frequency (Hz).
    pub min_freq_hz: f64,
    /// Upper bound of the logarithmic band scale (Hz).
    pub max_freq_hz: f64,
    /// Base gain applied to every band.
    pub sensitivity: f64,
    /// Peak displacement of the curve; the drawing surface is twice this tall.
    pub height: f64,
    /// Per-tick convergence of the band smoothing (0..=1).
    pub smoothing: f64,

    /// Analyser window length in samples (power of two).
    pub fft_size: usize,
    /// Analyser averaging between reads (0..1).
    pub time_smoothing: f64,
    /// Magnitude mapped to byte 0.
    pub min_decibels: f64,
    /// Magnitude mapped to byte 255.
    pub max_decibels: f64,
}

impl Default for VisualizerSettings {
    fn default() -> Self {
        Self {
            bands: 61,
            min_freq_hz: 50.0,
            max_freq_hz: 18_000.0,
            sensitivity: 0.235,
            height: 80.0,
            smoothing: 0.25,
            fft_size: 1024,
            time_smoothing: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TitleSettings {
    /// How long an overflowing title sits still before it starts scrolling (milliseconds).
    pub scroll_delay_ms: u64,
    /// Columns moved per frame while scrolling.
    pub scroll_step: u16,
}

impl Default for TitleSettings {
    fn default() -> Self {
        Self {
            scroll_delay_ms: 1000,
            scroll_step: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Target frame interval for animations (milliseconds).
    pub frame_ms: u64,
    /// Text shown in the header border.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            header_text: " lilt ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Whether dropped directories are expanded recursively.
    pub recursive: bool,
    /// Whether to follow symlinks while expanding directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles) found inside dropped directories.
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            recursive: true,
            follow_links: true,
            include_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file path. Defaults to `$XDG_STATE_HOME/lilt/lilt.log`.
    pub file: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}
