//! Rendering components for the native player.
//!
//! Animation area, progress bar, status bar and help overlay.

mod frames;
mod help;
mod progress;
mod status;

pub use frames::{build_view_lines, render_frames, ViewLine};
pub use help::{help_lines, render_help};
pub use progress::{build_progress_bar_chars, format_duration, progress_fraction, render_progress_bar};
pub use status::{render_separator_line, render_status_bar};
