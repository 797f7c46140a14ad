//! Stand-in album art: a fixed set of coloured glyph tiles handed out to
//! tracks by playlist position, wrapping around once the set runs out.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cover {
    pub glyph: &'static str,
    pub color: Color,
}

impl Cover {
    const fn new(glyph: &'static str, color: Color) -> Self {
        Self { glyph, color }
    }
}

pub const COVERS: [Cover; 11] = [
    Cover::new("◆", Color::Cyan),
    Cover::new("●", Color::Magenta),
    Cover::new("▲", Color::Yellow),
    Cover::new("■", Color::Green),
    Cover::new("★", Color::LightBlue),
    Cover::new("♠", Color::Red),
    Cover::new("♣", Color::LightGreen),
    Cover::new("♥", Color::LightMagenta),
    Cover::new("✦", Color::LightYellow),
    Cover::new("◉", Color::LightCyan),
    Cover::new("❖", Color::LightRed),
];

/// Cover for the track at playlist `index`.
pub fn cover_for(index: usize) -> Cover {
    COVERS[index % COVERS.len()]
}
