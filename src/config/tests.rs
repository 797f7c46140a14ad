use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_lilt_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("LILT_CONFIG_PATH", "/tmp/lilt-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/lilt-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("lilt")
            .join("config.toml")
    );
}

#[test]
fn default_paths_fall_back_to_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.config/lilt/config.toml")
    );
    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/lilt/lilt.log")
    );
}

#[test]
fn defaults_match_the_stock_player() {
    let s = Settings::default();
    assert_eq!(s.visualizer.bands, 61);
    assert_eq!(s.visualizer.min_freq_hz, 50.0);
    assert_eq!(s.visualizer.max_freq_hz, 18_000.0);
    assert_eq!(s.visualizer.sensitivity, 0.235);
    assert_eq!(s.visualizer.height, 80.0);
    assert_eq!(s.visualizer.smoothing, 0.25);
    assert_eq!(s.visualizer.fft_size, 1024);
    assert_eq!(s.title.scroll_delay_ms, 1000);
    assert_eq!(s.title.scroll_step, 1);
    assert!(s.playback.autoplay_on_first_add);
    assert!(!s.playback.shuffle);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
shuffle = true
repeat_one = true
autoplay_on_first_add = false

[visualizer]
sensitivity = 0.3
height = 40.0
fft_size = 2048

[title]
scroll_delay_ms = 250

[ui]
frame_ms = 33
header_text = "hello"

[library]
recursive = false
include_hidden = true

[logging]
file = "/tmp/lilt-test.log"
filter = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::remove("LILT__VISUALIZER__SENSITIVITY");
    let s = Settings::load_from(Some(&cfg_path)).unwrap();
    assert!(s.playback.shuffle);
    assert!(s.playback.repeat_one);
    assert!(!s.playback.autoplay_on_first_add);
    assert_eq!(s.visualizer.sensitivity, 0.3);
    assert_eq!(s.visualizer.height, 40.0);
    assert_eq!(s.visualizer.fft_size, 2048);
    // untouched keys keep their defaults
    assert_eq!(s.visualizer.bands, 61);
    assert_eq!(s.title.scroll_delay_ms, 250);
    assert_eq!(s.title.scroll_step, 1);
    assert_eq!(s.ui.frame_ms, 33);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert_eq!(
        s.logging.file.as_deref(),
        Some(std::path::Path::new("/tmp/lilt-test.log"))
    );
    assert_eq!(s.logging.filter, "debug");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[visualizer]
sensitivity = 0.3
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("LILT__VISUALIZER__SENSITIVITY", "0.5");
    let s = Settings::load_from(Some(&cfg_path)).unwrap();
    assert_eq!(s.visualizer.sensitivity, 0.5);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let s = Settings::load_from(Some(&dir.path().join("nope.toml"))).unwrap();
    assert_eq!(s.visualizer.bands, 61);
}

#[test]
fn validate_rejects_bad_values() {
    let mut s = Settings::default();
    s.visualizer.fft_size = 1000;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.visualizer.bands = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.visualizer.min_freq_hz = 20_000.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.title.scroll_step = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.frame_ms = 0;
    assert!(s.validate().is_err());
}
