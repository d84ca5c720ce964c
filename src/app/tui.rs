//! Terminal management
//!
//! Owns the crossterm backend for the lifetime of the app and turns terminal
//! events into key presses for the screens.

use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::Duration,
};

/// How long to wait for input before the UI loop runs again
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Terminal wrapper that manages crossterm backend and screen state
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    raw_mode: bool,
    poll_interval: Duration,
}

impl Tui {
    /// Create a TUI that waits at most `poll_interval` for each key
    pub fn new(poll_interval: Duration) -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        Ok(Self {
            terminal,
            raw_mode: false,
            poll_interval,
        })
    }

    /// Enter raw mode and the alternate screen
    pub fn init(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        self.raw_mode = true;
        execute!(io::stdout(), EnterAlternateScreen)?;
        self.terminal.hide_cursor()?;
        self.terminal.clear()
    }

    /// Restore terminal to original state; does nothing if never initialized
    pub fn restore(&mut self) -> io::Result<()> {
        if !std::mem::take(&mut self.raw_mode) {
            return Ok(());
        }
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }

    /// Draw the UI using the provided render function
    pub fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(render).map(|_| ())
    }

    /// Next key press or auto-repeat, `None` if nothing arrived in time.
    ///
    /// Key releases are dropped, terminals that report them would otherwise
    /// count every key twice.
    pub fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        if !event::poll(self.poll_interval)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        // Ensure terminal is restored even if restore() wasn't called
        let _ = self.restore();
    }
}
