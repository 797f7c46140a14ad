//! Terminal setup and the two requests a player makes of its host shell:
//! get out of the way (minimize) and go away (close).

use std::io::{self, Stdout};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellSignal {
    /// Suspend to the shell; the UI comes back on `fg`.
    Minimize,
    Close,
}

pub fn enter() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    // Bracketed paste is how terminals deliver dropped files.
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture
    )?;
    Terminal::new(CrosstermBackend::new(stdout))
}

pub fn leave(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()
}

/// Hand the terminal back, stop the process with `SIGTSTP` and restore the UI on resume.
#[cfg(unix)]
pub fn minimize(terminal: &mut Tui) -> io::Result<()> {
    leave(terminal)?;
    // SAFETY: raising a signal on our own process has no memory-safety preconditions.
    let rc = unsafe { libc::raise(libc::SIGTSTP) };
    if rc != 0 {
        tracing::warn!("failed to suspend to the shell");
    }

    enable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture
    )?;
    terminal.clear()
}

#[cfg(not(unix))]
pub fn minimize(_terminal: &mut Tui) -> io::Result<()> {
    tracing::debug!("minimize is not supported on this platform");
    Ok(())
}
