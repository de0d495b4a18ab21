//! Terminal ownership for the gallery.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

/// Raw mode + alternate screen ratatui terminal, restored on drop.
pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
}

impl App {
    #[cfg(not(tarpaulin_include))]
    pub fn new(tick_rate: Duration) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;
        let mut terminal =
            Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            tick_rate,
        })
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render).context("Failed to draw frame")?;
        Ok(())
    }

    /// Hand the terminal back, e.g. to run the player.
    #[cfg(not(tarpaulin_include))]
    pub fn suspend(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)?;
        Ok(())
    }

    #[cfg(not(tarpaulin_include))]
    pub fn resume(&mut self) -> Result<()> {
        enable_raw_mode()?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen, Hide)?;
        self.terminal.clear()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show);
    }
}
