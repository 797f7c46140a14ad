use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::*;
use crate::app::{App, PlaybackState};
use crate::config::{LibrarySettings, Settings};
use crate::playlist::MediaRef;
use crate::visualizer::FrequencySource;

struct Silence;

impl FrequencySource for Silence {
    fn sample_rate(&self) -> u32 {
        44_100
    }

    fn bin_count(&self) -> usize {
        512
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        out.fill(0);
    }
}

#[derive(Default)]
struct FakeBackend {
    loaded: Option<MediaRef>,
    playing: bool,
    ended: bool,
    duration: Option<Duration>,
    seeked_to: Option<Duration>,
    loads: Vec<PathBuf>,
    restarts: usize,
    broken: Vec<String>,
    sources_made: Cell<usize>,
}

impl PlaybackBackend for FakeBackend {
    fn load(&mut self, media: &MediaRef) -> anyhow::Result<()> {
        self.loaded = None;
        self.playing = false;
        self.ended = false;
        let name = media
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.broken.contains(&name) {
            anyhow::bail!("cannot decode {name}");
        }
        self.loads.push(media.path().to_path_buf());
        self.loaded = Some(media.clone());
        Ok(())
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn restart(&mut self) -> anyhow::Result<()> {
        self.restarts += 1;
        self.ended = false;
        self.playing = false;
        Ok(())
    }

    fn seek(&mut self, position: Duration) {
        self.seeked_to = Some(position);
    }

    fn position(&self) -> Duration {
        self.seeked_to.unwrap_or(Duration::ZERO)
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    fn has_ended(&self) -> bool {
        self.ended
    }

    fn frequency_source(&self) -> Box<dyn FrequencySource> {
        self.sources_made.set(self.sources_made.get() + 1);
        Box::new(Silence)
    }
}

fn touch(dir: &Path, name: &str) -> PathBuf {
    let p = dir.join(name);
    std::fs::write(&p, b"not really audio").unwrap();
    p
}

fn loaded_name(b: &FakeBackend) -> Option<String> {
    b.loaded
        .as_ref()
        .and_then(|m| m.path().file_name())
        .map(|n| n.to_string_lossy().into_owned())
}

fn setup(names: &[&str]) -> (tempfile::TempDir, App, FakeBackend) {
    let tmp = tempfile::tempdir().unwrap();
    let mut app = App::new(&Settings::default());
    let mut backend = FakeBackend::default();
    let items = names.iter().map(|n| touch(tmp.path(), n)).collect();
    ingest(
        &mut app,
        &mut backend,
        items,
        &LibrarySettings::default(),
        Instant::now(),
    );
    (tmp, app, backend)
}

#[test]
fn first_ingest_selects_and_plays_the_first_track() {
    let (_tmp, app, backend) = setup(&["one.mp3", "notes.txt", "two.flac"]);

    assert_eq!(app.playlist.len(), 2);
    assert_eq!(app.playlist.get(0).unwrap().display_name, "one");
    assert_eq!(app.playlist.get(1).unwrap().display_name, "two");
    assert_eq!(app.order.current(), Some(0));
    assert_eq!(app.playback(), PlaybackState::Playing);
    assert_eq!(loaded_name(&backend).as_deref(), Some("one.mp3"));
    assert!(backend.playing);
    assert!(app.visualizer.is_initialized());
    assert!(app.visualizer.is_running());
}

#[test]
fn first_ingest_without_autoplay_loads_paused() {
    let tmp = tempfile::tempdir().unwrap();
    let mut settings = Settings::default();
    settings.playback.autoplay_on_first_add = false;
    let mut app = App::new(&settings);
    let mut backend = FakeBackend::default();

    ingest(
        &mut app,
        &mut backend,
        vec![touch(tmp.path(), "a.ogg")],
        &settings.library,
        Instant::now(),
    );
    assert_eq!(app.order.current(), Some(0));
    assert_eq!(app.playback(), PlaybackState::Paused);
    assert!(backend.is_loaded());
    assert!(!backend.playing);
    assert!(!app.visualizer.is_initialized());
}

#[test]
fn later_ingest_keeps_the_current_track() {
    let (tmp, mut app, mut backend) = setup(&["a.mp3", "b.mp3"]);
    next(&mut app, &mut backend, Instant::now());
    assert_eq!(app.order.current(), Some(1));

    let got = ingest(
        &mut app,
        &mut backend,
        vec![touch(tmp.path(), "c.mp3")],
        &LibrarySettings::default(),
        Instant::now(),
    );
    assert_eq!(got.added, 2..3);
    assert_eq!(app.order.current(), Some(1));
    assert_eq!(backend.loads.len(), 2);
}

#[test]
fn non_audio_only_batch_adds_nothing() {
    let (_tmp, app, backend) = setup(&["cover.jpg", "readme.txt"]);
    assert!(app.playlist.is_empty());
    assert_eq!(app.order.current(), None);
    assert!(!backend.is_loaded());
    assert_eq!(app.playback(), PlaybackState::Stopped);
}

#[test]
fn transport_on_empty_playlist_is_a_no_op() {
    let mut app = App::new(&Settings::default());
    let mut backend = FakeBackend::default();
    let now = Instant::now();

    play_pause(&mut app, &mut backend);
    next(&mut app, &mut backend, now);
    prev(&mut app, &mut backend, now);
    play_selected(&mut app, &mut backend, now);
    seek_fraction(&mut app, &mut backend, 0.5);

    assert_eq!(app.order.current(), None);
    assert!(backend.loads.is_empty());
    assert!(!backend.playing);
    assert_eq!(backend.seeked_to, None);
    assert!(!app.visualizer.is_initialized());
}

#[test]
fn play_pause_toggles_and_initializes_the_visualizer_once() {
    let (_tmp, mut app, mut backend) = setup(&["a.mp3"]);
    assert_eq!(backend.sources_made.get(), 1);

    play_pause(&mut app, &mut backend);
    assert_eq!(app.playback(), PlaybackState::Paused);
    assert!(!backend.playing);

    play_pause(&mut app, &mut backend);
    assert_eq!(app.playback(), PlaybackState::Playing);
    assert!(backend.playing);
    assert_eq!(backend.sources_made.get(), 1);
}

#[test]
fn next_and_prev_wrap_sequentially() {
    let (_tmp, mut app, mut backend) = setup(&["a.mp3", "b.mp3", "c.mp3"]);
    let now = Instant::now();

    next(&mut app, &mut backend, now);
    assert_eq!(loaded_name(&backend).as_deref(), Some("b.mp3"));
    next(&mut app, &mut backend, now);
    next(&mut app, &mut backend, now);
    assert_eq!(app.order.current(), Some(0));

    prev(&mut app, &mut backend, now);
    assert_eq!(app.order.current(), Some(2));
    assert_eq!(app.selected, 2);
    assert!(backend.playing);
}

#[test]
fn ended_track_advances_unless_repeating() {
    let (_tmp, mut app, mut backend) = setup(&["a.mp3", "b.mp3"]);
    let now = Instant::now();

    backend.ended = true;
    assert!(poll_ended(&mut app, &mut backend, now));
    assert_eq!(app.order.current(), Some(1));
    assert_eq!(backend.restarts, 0);

    toggle_repeat(&mut app);
    backend.ended = true;
    assert!(poll_ended(&mut app, &mut backend, now));
    assert_eq!(app.order.current(), Some(1));
    assert_eq!(backend.restarts, 1);
    assert!(backend.playing);
    assert_eq!(app.playback(), PlaybackState::Playing);
}

#[test]
fn paused_backend_is_not_polled_for_end() {
    let (_tmp, mut app, mut backend) = setup(&["a.mp3", "b.mp3"]);
    pause(&mut app, &mut backend);
    backend.ended = true;
    assert!(!poll_ended(&mut app, &mut backend, Instant::now()));
    assert_eq!(app.order.current(), Some(0));
}

#[test]
fn seek_is_proportional_to_duration() {
    let (_tmp, mut app, mut backend) = setup(&["a.mp3"]);

    seek_fraction(&mut app, &mut backend, 0.5);
    assert_eq!(backend.seeked_to, None);

    backend.duration = Some(Duration::from_secs(200));
    seek_fraction(&mut app, &mut backend, 0.25);
    assert_eq!(backend.seeked_to, Some(Duration::from_secs(50)));
    seek_fraction(&mut app, &mut backend, 3.0);
    assert_eq!(backend.seeked_to, Some(Duration::from_secs(200)));

    let p = update_progress(&mut app, &backend);
    assert_eq!(p.fraction(), 1.0);
    assert_eq!(p.total_label(), "3:20");
}

#[test]
fn unplayable_track_stays_selected_but_stopped() {
    let tmp = tempfile::tempdir().unwrap();
    let mut app = App::new(&Settings::default());
    let mut backend = FakeBackend {
        broken: vec!["bad.mp3".to_string()],
        ..FakeBackend::default()
    };
    let items = vec![touch(tmp.path(), "bad.mp3"), touch(tmp.path(), "good.mp3")];

    ingest(
        &mut app,
        &mut backend,
        items,
        &LibrarySettings::default(),
        Instant::now(),
    );
    assert_eq!(app.order.current(), Some(0));
    assert_eq!(app.playback(), PlaybackState::Paused);
    assert!(!backend.is_loaded());
    assert!(app.status.as_deref().unwrap_or("").contains("bad"));

    play_pause(&mut app, &mut backend);
    assert!(!backend.playing);

    next(&mut app, &mut backend, Instant::now());
    assert_eq!(loaded_name(&backend).as_deref(), Some("good.mp3"));
    assert!(backend.playing);
}

#[test]
fn shuffle_order_grows_with_the_playlist() {
    let (tmp, mut app, mut backend) = setup(&["a.mp3", "b.mp3"]);
    toggle_shuffle(&mut app);
    assert!(app.order.is_shuffle());

    let more = vec![touch(tmp.path(), "c.mp3"), touch(tmp.path(), "d.mp3")];
    ingest(
        &mut app,
        &mut backend,
        more,
        &LibrarySettings::default(),
        Instant::now(),
    );

    let mut order = app.order.shuffle_state().order.clone();
    order.sort_unstable();
    assert_eq!(order, vec![0, 1, 2, 3]);
}

#[test]
fn play_selected_loads_the_highlighted_row() {
    let (_tmp, mut app, mut backend) = setup(&["a.mp3", "b.mp3", "c.mp3"]);
    app.select_last();
    play_selected(&mut app, &mut backend, Instant::now());
    assert_eq!(app.order.current(), Some(2));
    assert_eq!(loaded_name(&backend).as_deref(), Some("c.mp3"));
}

#[test]
fn typed_path_with_spaces_is_taken_whole() {
    let tmp = tempfile::tempdir().unwrap();
    let song = touch(tmp.path(), "My Song.mp3");
    let mut app = App::new(&Settings::default());
    let mut backend = FakeBackend::default();

    let typed = song.display().to_string();
    let added = ingest_text(
        &mut app,
        &mut backend,
        &typed,
        &LibrarySettings::default(),
        Instant::now(),
    );

    assert_eq!(added.count(), 1);
    assert_eq!(app.playlist.get(0).unwrap().display_name, "My Song");
    assert_eq!(loaded_name(&backend).as_deref(), Some("My Song.mp3"));
}

#[test]
fn each_load_shows_the_cover_for_its_index() {
    let (_tmp, mut app, mut backend) = setup(&["a.mp3", "b.mp3", "c.mp3"]);
    assert_eq!(app.cover, Some(0));

    next(&mut app, &mut backend, Instant::now());
    assert_eq!(app.cover, Some(1));

    backend.broken.push("a.mp3".into());
    load(&mut app, &mut backend, 0, true, Instant::now());
    assert_eq!(app.cover, Some(0));
}
