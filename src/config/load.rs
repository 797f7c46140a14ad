use std::{
    env,
    path::{Path, PathBuf},
};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `LILT__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and the resolved config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(resolve_config_path().as_deref())
    }

    /// Load settings from environment and an explicit (optional) config file.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("LILT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let vis = &self.visualizer;
        if vis.bands == 0 {
            return Err("visualizer.bands must be >= 1".to_string());
        }
        if !(vis.min_freq_hz > 0.0 && vis.min_freq_hz < vis.max_freq_hz) {
            return Err("visualizer.min_freq_hz must be > 0 and below max_freq_hz".to_string());
        }
        if !vis.fft_size.is_power_of_two() || !(32..=32_768).contains(&vis.fft_size) {
            return Err("visualizer.fft_size must be a power of two in 32..=32768".to_string());
        }
        if !(vis.smoothing > 0.0 && vis.smoothing <= 1.0) {
            return Err("visualizer.smoothing must be in (0, 1]".to_string());
        }
        if !(0.0..1.0).contains(&vis.time_smoothing) {
            return Err("visualizer.time_smoothing must be in [0, 1)".to_string());
        }
        if vis.min_decibels >= vis.max_decibels {
            return Err("visualizer.min_decibels must be below max_decibels".to_string());
        }
        if vis.height <= 0.0 {
            return Err("visualizer.height must be > 0".to_string());
        }
        if self.title.scroll_step == 0 {
            return Err("title.scroll_step must be >= 1".to_string());
        }
        if self.ui.frame_ms == 0 {
            return Err("ui.frame_ms must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `LILT_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("LILT_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/lilt/config.toml`
/// or `~/.config/lilt/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("lilt").join("config.toml"))
}

/// Compute the default log path under `$XDG_STATE_HOME/lilt/lilt.log`
/// or `~/.local/state/lilt/lilt.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("lilt").join("lilt.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
