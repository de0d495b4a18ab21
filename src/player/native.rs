//! Interactive terminal player.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event, execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use super::input::handle_event;
use super::playlist::Playlist;
use super::render::{
    build_view_lines, render_frames, render_help, render_progress_bar, render_separator_line,
    render_status_bar,
};
use super::state::{InputResult, PlaybackState};

/// Upper bound on how long the loop blocks waiting for input.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// How a playback session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackResult {
    /// Every entry played all its loops
    Finished,
    /// The user quit
    Interrupted,
}

/// Raw mode + alternate screen for the lifetime of the guard.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut io::Stdout) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = Self;
        execute!(stdout, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Play a playlist full screen until it finishes or the user quits.
#[cfg(not(tarpaulin_include))]
pub fn play_native(playlist: &Playlist, tick_delay: Duration) -> Result<PlaybackResult> {
    if playlist.is_finished(0) {
        return Ok(PlaybackResult::Finished);
    }

    let mut stdout = io::stdout();
    let (cols, rows) = terminal::size().context("Failed to query terminal size")?;
    let _guard = TerminalGuard::enter(&mut stdout)?;

    let mut state = PlaybackState::new(cols, rows);
    let last_tick = playlist.total_ticks().map(|t| t.saturating_sub(1));
    tracing::debug!(?tick_delay, total_ticks = ?playlist.total_ticks(), "starting native playback");

    loop {
        if state.needs_render {
            draw(&mut stdout, &state, playlist, tick_delay)?;
            state.needs_render = false;
        }

        let timeout = if state.paused {
            POLL_INTERVAL
        } else {
            state
                .time_until_next(Instant::now(), tick_delay)
                .min(POLL_INTERVAL)
        };
        if event::poll(timeout)? {
            let ev = event::read()?;
            if handle_event(ev, &mut state, last_tick) == InputResult::Quit {
                return Ok(PlaybackResult::Interrupted);
            }
        }

        if state.advance_if_due(Instant::now(), tick_delay) && playlist.is_finished(state.tick) {
            return Ok(PlaybackResult::Finished);
        }
    }
}

/// Draw one full screen.
fn draw<W: Write>(
    out: &mut W,
    state: &PlaybackState,
    playlist: &Playlist,
    tick_delay: Duration,
) -> Result<()> {
    if state.show_help {
        render_help(out, state.term_cols, state.term_rows)?;
        out.flush()?;
        return Ok(());
    }

    let cols = state.term_cols;
    let view_rows = state.view_rows();
    let total = playlist.total_ticks();

    let lines = build_view_lines(playlist, state.tick, view_rows);
    render_frames(out, &lines, cols, view_rows as u16)?;

    let base = state.term_rows.saturating_sub(PlaybackState::STATUS_LINES);
    render_separator_line(out, cols, base)?;
    render_progress_bar(
        out,
        cols,
        base + 1,
        state.tick,
        total,
        playlist.cycle_length(),
        state.effective_delay(tick_delay),
    )?;
    render_status_bar(out, cols, base + 2, state.paused, state.speed, state.tick, total)?;
    out.flush()?;
    Ok(())
}
