//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. The
//! layout is shared with the event loop so mouse clicks can be mapped back
//! onto the progress bar and the playlist.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap,
        canvas::{Canvas, Line as CanvasLine},
    },
};

use crate::app::{App, InputMode, PlaybackState, text_width};
use crate::config::UiSettings;
use crate::cover::cover_for;

/// Bézier samples per band when drawing the curve.
const CURVE_SEGMENTS: usize = 4;

const CONTROLS: &[(&str, &str)] = &[
    ("space/p", "play/pause"),
    ("h/l", "prev/next"),
    ("j/k", "up/down"),
    ("enter", "play selected"),
    ("s", "shuffle"),
    ("r", "repeat one"),
    ("o", "open"),
    ("m", "minimize"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Screen regions, outer (bordered) rectangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub visualizer: Rect,
    pub progress: Rect,
    pub list: Rect,
    pub footer: Rect,
}

impl Areas {
    /// Where the title marquee is drawn.
    pub fn title(&self) -> Rect {
        inner(self.header)
    }

    pub fn canvas(&self) -> Rect {
        inner(self.visualizer)
    }

    /// The clickable bar itself.
    pub fn gauge(&self) -> Rect {
        inner(self.progress)
    }

    pub fn list_rows(&self) -> Rect {
        inner(self.list)
    }
}

fn inner(r: Rect) -> Rect {
    r.inner(Margin {
        horizontal: 1,
        vertical: 1,
    })
}

pub fn layout(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(12),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .split(area);
    Areas {
        header: chunks[0],
        visualizer: chunks[1],
        progress: chunks[2],
        list: chunks[3],
        footer: chunks[4],
    }
}

/// Fraction of the progress bar left of column `x`, if `(x, y)` hits the bar.
pub fn progress_fraction_at(areas: &Areas, x: u16, y: u16) -> Option<f64> {
    let bar = areas.gauge();
    if bar.width == 0 || !bar.contains((x, y).into()) {
        return None;
    }
    Some(f64::from(x - bar.x) / f64::from(bar.width))
}

/// Playlist index of the row at `(x, y)`, given the first visible index.
pub fn list_index_at(areas: &Areas, first_visible: usize, x: u16, y: u16) -> Option<usize> {
    let rows = areas.list_rows();
    if !rows.contains((x, y).into()) {
        return None;
    }
    Some(first_visible + usize::from(y - rows.y))
}

/// Window of rows `[start, end)` that keeps `selected` centred when possible.
pub fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let areas = layout(frame.area());

    draw_header(frame, app, ui_settings, areas.header);
    draw_visualizer(frame, app, areas.visualizer);
    draw_progress(frame, app, areas.progress);
    draw_list(frame, app, areas.list);
    draw_footer(frame, app, areas.footer);
}

fn draw_header(frame: &mut Frame, app: &App, ui_settings: &UiSettings, area: Rect) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(ui_settings.header_text.as_str())
        .title_alignment(Alignment::Center);
    if let Some(cover) = app.cover.map(cover_for) {
        let tile = Span::styled(
            format!(" {} ", cover.glyph),
            Style::default().fg(Color::Black).bg(cover.color),
        );
        block = block.title(Line::from(tile).left_aligned());
    }
    frame.render_widget(block, area);

    let r = inner(area);
    let text = app.title_text();
    let style = if app.now_playing().is_some() {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    if app.title.is_static() || r.width == 0 {
        let title = Paragraph::new(Span::styled(text, style)).alignment(Alignment::Center);
        frame.render_widget(title, r);
        return;
    }

    let offset = app.title.offset();
    if offset >= 0 {
        let shift = u16::try_from(offset).unwrap_or(u16::MAX).min(r.width);
        let rest = Rect {
            x: r.x + shift,
            width: r.width - shift,
            ..r
        };
        frame.render_widget(Paragraph::new(Span::styled(text, style)), rest);
    } else {
        let skip = u16::try_from(-offset).unwrap_or(u16::MAX);
        if skip < text_width(text) {
            let title = Paragraph::new(Span::styled(text, style)).scroll((0, skip));
            frame.render_widget(title, r);
        }
    }
}

fn draw_visualizer(frame: &mut Frame, app: &App, area: Rect) {
    let surface = app.visualizer.surface();
    let points = app.visualizer.curve(CURVE_SEGMENTS);

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(" waveform "))
        .marker(Marker::Braille)
        .x_bounds([0.0, surface.width.max(1.0)])
        .y_bounds([0.0, surface.height])
        .paint(move |ctx| {
            for pair in points.windows(2) {
                let (x1, y1) = pair[0];
                let (x2, y2) = pair[1];
                ctx.draw(&CanvasLine::new(x1, y1, x2, y2, Color::Cyan));
            }
        });
    frame.render_widget(canvas, area);
}

fn state_glyph(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Playing => " ▶ playing ",
        PlaybackState::Paused => " ⏸ paused ",
        PlaybackState::Stopped => " ■ stopped ",
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

fn draw_progress(frame: &mut Frame, app: &App, area: Rect) {
    let modes = format!(
        " shuffle: {} • repeat one: {} ",
        on_off(app.order.is_shuffle()),
        on_off(app.order.is_repeat_one())
    );
    let progress = app.progress;
    let label = format!(
        "{} / {}",
        progress.elapsed_label(),
        progress.total_label()
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(state_glyph(app.playback()))
                .title(Line::from(modes).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(progress.fraction())
        .label(label);
    frame.render_widget(gauge, area);
}

fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" playlist ");

    if app.playlist.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from("Drop audio files here"),
            Line::from("or press o (or click) to open them").dim(),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let rows = inner(area);
    let total = app.playlist.len();
    let (start, end) = visible_window(total, usize::from(rows.height), app.selected);
    let current = app.order.current();

    let items: Vec<ListItem> = app.playlist.tracks()[start..end]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let index = start + offset;
            let name = track.display_name.as_str();
            if Some(index) == current {
                ListItem::new(Line::from(vec![Span::raw("♪ "), Span::raw(name)]).bold())
            } else {
                ListItem::new(Line::from(vec![Span::raw("  "), Span::raw(name)]))
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(app.selected - start));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let padding = Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    };

    let footer = match &app.input {
        InputMode::Open { input } => Paragraph::new(format!("{input}▏")).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" open (enter adds, esc cancels) ")
                .padding(padding),
        ),
        InputMode::Normal => {
            let text = app.status.clone().unwrap_or_else(controls_text);
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" controls ")
                        .padding(padding),
                )
                .wrap(Wrap { trim: true })
        }
    };
    frame.render_widget(footer, area);
}
