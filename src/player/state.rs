//! Mutable state of the native player: clock, speed, overlay and terminal
//! size. Input handlers change it, the draw loop reads it.

use std::time::{Duration, Instant};

/// Result of processing an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Playback position and UI flags.
#[derive(Debug)]
pub struct PlaybackState {
    pub paused: bool,
    /// Multiplier on the tick rate, 0.1 to 16.
    pub speed: f64,
    pub tick: usize,
    /// When `tick` last moved forward on its own.
    pub last_advance: Instant,
    pub show_help: bool,
    pub term_cols: u16,
    pub term_rows: u16,
    /// Set by anything that changes what is on screen.
    pub needs_render: bool,
}

impl PlaybackState {
    /// Separator, progress bar and status bar.
    pub const STATUS_LINES: u16 = 3;

    pub fn new(term_cols: u16, term_rows: u16) -> Self {
        Self {
            paused: false,
            speed: 1.0,
            tick: 0,
            last_advance: Instant::now(),
            show_help: false,
            term_cols,
            term_rows,
            needs_render: true,
        }
    }

    /// Rows available for animation frames.
    pub fn view_rows(&self) -> usize {
        self.term_rows.saturating_sub(Self::STATUS_LINES) as usize
    }

    pub fn handle_resize(&mut self, new_cols: u16, new_rows: u16) {
        self.term_cols = new_cols;
        self.term_rows = new_rows;
        self.needs_render = true;
    }

    /// Resuming restarts the tick timer.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if !self.paused {
            self.last_advance = Instant::now();
        }
        self.needs_render = true;
    }

    pub fn speed_up(&mut self) {
        self.speed = (self.speed * 1.5).min(16.0);
        self.needs_render = true;
    }

    pub fn speed_down(&mut self) {
        self.speed = (self.speed / 1.5).max(0.1);
        self.needs_render = true;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.needs_render = true;
    }

    /// Move one tick forward while paused, never past `last_tick`.
    pub fn step_forward(&mut self, last_tick: Option<usize>) {
        if !self.paused {
            return;
        }
        let next = self.tick + 1;
        self.tick = match last_tick {
            Some(last) => next.min(last),
            None => next,
        };
        self.needs_render = true;
    }

    /// Move one tick back while paused.
    pub fn step_back(&mut self) {
        if !self.paused {
            return;
        }
        self.tick = self.tick.saturating_sub(1);
        self.needs_render = true;
    }

    /// Jump back to the first tick.
    pub fn restart(&mut self) {
        self.tick = 0;
        self.last_advance = Instant::now();
        self.needs_render = true;
    }

    /// Tick interval at the current speed.
    pub fn effective_delay(&self, base: Duration) -> Duration {
        base.div_f64(self.speed)
    }

    /// Advance the tick if the delay has elapsed. Returns true on advance.
    pub fn advance_if_due(&mut self, now: Instant, base: Duration) -> bool {
        if self.paused {
            return false;
        }
        if now.duration_since(self.last_advance) < self.effective_delay(base) {
            return false;
        }
        self.tick += 1;
        self.last_advance = now;
        self.needs_render = true;
        true
    }

    /// Time left until the next tick is due.
    pub fn time_until_next(&self, now: Instant, base: Duration) -> Duration {
        let due = self.last_advance + self.effective_delay(base);
        due.saturating_duration_since(now)
    }
}
