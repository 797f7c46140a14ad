use std::path::Path;

use crate::config;

/// Load settings, falling back to defaults on any failure.
///
/// Logging is not up yet when this runs, so the reason for a fallback is
/// handed back for the caller to log.
pub fn load_settings(config_path: Option<&Path>) -> (config::Settings, Option<String>) {
    let loaded = match config_path {
        Some(path) => config::Settings::load_from(Some(path)),
        None => config::Settings::load(),
    };
    match loaded {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {msg}")),
            ),
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}
