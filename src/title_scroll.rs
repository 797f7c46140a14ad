//! Marquee for the now-playing title.
//!
//! A title that fits its container sits still and centred. One that overflows
//! waits for a moment, then enters from the right edge and slides left one
//! step per frame, re-entering from the right once it has fully left.

use std::time::{Duration, Instant};

use crate::config::TitleSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// Title fits; drawn centred at offset 0.
    Static,
    /// Title overflows; holding still until `until`.
    Waiting { until: Instant },
    Scrolling,
}

#[derive(Debug, Clone)]
pub struct TitleScroller {
    delay: Duration,
    step: i32,
    text_width: u16,
    container_width: u16,
    offset: i32,
    phase: ScrollPhase,
}

impl TitleScroller {
    pub fn new(settings: &TitleSettings) -> Self {
        Self {
            delay: Duration::from_millis(settings.scroll_delay_ms),
            step: i32::from(settings.scroll_step.max(1)),
            text_width: 0,
            container_width: 0,
            offset: 0,
            phase: ScrollPhase::Static,
        }
    }

    /// Measure a new title against its container and restart the animation.
    pub fn show(&mut self, text_width: u16, container_width: u16, now: Instant) {
        self.text_width = text_width;
        self.container_width = container_width;
        self.offset = 0;
        self.phase = if text_width <= container_width {
            ScrollPhase::Static
        } else {
            ScrollPhase::Waiting {
                until: now + self.delay,
            }
        };
    }

    /// Re-measure when the container changes width.
    pub fn resize(&mut self, container_width: u16, now: Instant) {
        if container_width != self.container_width {
            self.show(self.text_width, container_width, now);
        }
    }

    /// Advance one frame. Returns `true` when the offset moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.phase {
            ScrollPhase::Static => false,
            ScrollPhase::Waiting { until } => {
                if now < until {
                    return false;
                }
                self.phase = ScrollPhase::Scrolling;
                self.offset = i32::from(self.container_width);
                self.step_left();
                true
            }
            ScrollPhase::Scrolling => {
                self.step_left();
                true
            }
        }
    }

    fn step_left(&mut self) {
        self.offset -= self.step;
        if self.offset < -i32::from(self.text_width) {
            self.offset = i32::from(self.container_width);
        }
    }

    /// Horizontal position of the title's left edge relative to the container.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    #[cfg(test)]
    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn is_static(&self) -> bool {
        self.phase == ScrollPhase::Static
    }

    pub fn container_width(&self) -> u16 {
        self.container_width
    }
}

#[cfg(test)]
mod tests;
