use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::app::{App, PlaybackState};
use crate::audio::PlaybackBackend;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::runtime::shell::{self, ShellSignal, Tui};
use crate::transport;
use crate::ui::{self, Areas};

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Last-known loaded index as emitted to MPRIS.
    pub last_mpris_index: Option<usize>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
    /// Layout of the last drawn frame, for mapping mouse clicks.
    areas: Areas,
    next_frame: Instant,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            pending_gg: false,
            last_mpris_index: app.order.current(),
            last_mpris_playback: app.playback(),
            areas: Areas::default(),
            next_frame: Instant::now(),
        }
    }
}

/// Main terminal event loop: handles input, animation ticks, UI drawing,
/// end-of-track detection and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Tui,
    settings: &config::Settings,
    app: &mut App,
    backend: &mut dyn PlaybackBackend,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> anyhow::Result<()> {
    let frame_interval = Duration::from_millis(settings.ui.frame_ms);

    loop {
        let now = Instant::now();
        transport::poll_ended(app, backend, now);

        if now >= state.next_frame {
            app.visualizer.tick();
            app.title.tick(now);
            transport::update_progress(app, backend);
            state.next_frame = now + frame_interval;

            terminal.draw(|f| {
                let areas = ui::layout(f.area());
                app.title.resize(areas.title().width, now);
                app.visualizer.resize(f64::from(areas.canvas().width));
                state.areas = areas;
                ui::draw(f, app, &settings.ui);
            })?;
        }

        // Keep MPRIS in sync even when playback changes come from media keys or auto-advance.
        if app.order.current() != state.last_mpris_index
            || app.playback() != state.last_mpris_playback
        {
            update_mpris(mpris, app);
            state.last_mpris_index = app.order.current();
            state.last_mpris_playback = app.playback();
        }

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, backend) {
                return Ok(());
            }
        }

        let timeout = state.next_frame.saturating_duration_since(Instant::now());
        if !event::poll(timeout)? {
            continue;
        }
        let signal = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                handle_key_event(key, settings, app, backend, state)
            }
            Event::Paste(text) => {
                handle_paste(&text, settings, app, backend);
                None
            }
            Event::Mouse(mouse) => {
                handle_mouse_event(mouse, app, backend, state);
                None
            }
            _ => None,
        };

        match signal {
            Some(ShellSignal::Close) => return Ok(()),
            Some(ShellSignal::Minimize) => {
                shell::minimize(terminal)?;
                state.next_frame = Instant::now();
            }
            None => {}
        }
    }
}

fn handle_control_cmd(cmd: ControlCmd, app: &mut App, backend: &mut dyn PlaybackBackend) -> bool {
    let now = Instant::now();
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => transport::play(app, backend),
        ControlCmd::Pause | ControlCmd::Stop => transport::pause(app, backend),
        ControlCmd::PlayPause => transport::play_pause(app, backend),
        ControlCmd::Next => transport::next(app, backend, now),
        ControlCmd::Prev => transport::prev(app, backend, now),
    }
    false
}

fn handle_paste(
    text: &str,
    settings: &config::Settings,
    app: &mut App,
    backend: &mut dyn PlaybackBackend,
) {
    if app.is_open_mode() {
        app.push_input_str(text.trim_end_matches(['\r', '\n']));
        return;
    }
    transport::ingest_text(app, backend, text, &settings.library, Instant::now());
}

fn handle_mouse_event(
    mouse: MouseEvent,
    app: &mut App,
    backend: &mut dyn PlaybackBackend,
    state: &EventLoopState,
) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let (x, y) = (mouse.column, mouse.row);
    let areas = &state.areas;

    if let Some(fraction) = ui::progress_fraction_at(areas, x, y) {
        transport::seek_fraction(app, backend, fraction);
        return;
    }

    if app.playlist.is_empty() {
        // The whole empty playlist is the drop area; clicking it opens the prompt.
        if areas.list.contains((x, y).into()) || areas.visualizer.contains((x, y).into()) {
            app.enter_open_mode();
        }
        return;
    }

    let rows = areas.list_rows();
    let (first, _) = ui::visible_window(app.playlist.len(), usize::from(rows.height), app.selected);
    if let Some(index) = ui::list_index_at(areas, first, x, y) {
        app.set_selected(index);
    }
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    backend: &mut dyn PlaybackBackend,
    state: &mut EventLoopState,
) -> Option<ShellSignal> {
    let now = Instant::now();

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(ShellSignal::Close);
    }

    if app.is_open_mode() {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => app.pop_input_char(),
            KeyCode::Enter => {
                let input = app.take_input().unwrap_or_default();
                transport::ingest_text(app, backend, &input, &settings.library, now);
            }
            KeyCode::Char(c) if !c.is_control() => app.push_input_char(c),
            _ => {}
        }
        return None;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => return Some(ShellSignal::Close),
        KeyCode::Char('m') => return Some(ShellSignal::Minimize),
        KeyCode::Char('o') => app.enter_open_mode(),
        KeyCode::Char(' ') | KeyCode::Char('p') => transport::play_pause(app, backend),
        KeyCode::Char('l') => transport::next(app, backend, now),
        KeyCode::Char('h') => transport::prev(app, backend, now),
        KeyCode::Char('s') => transport::toggle_shuffle(app),
        KeyCode::Char('r') => transport::toggle_repeat(app),
        KeyCode::Enter => transport::play_selected(app, backend, now),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Home => app.select_first(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Esc => app.status = None,
        _ => {}
    }
    None
}
