//! Animation area rendering for the native player.
//!
//! Entries are stacked top to bottom, each under a one-line title, and the
//! result is clipped to the visible area.

use std::io::Write;

use anyhow::Result;

use crate::frame::truncate_line;
use crate::player::playlist::Playlist;

/// One row of the animation area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewLine {
    Title(String),
    Frame(String),
}

impl ViewLine {
    pub fn text(&self) -> &str {
        match self {
            ViewLine::Title(s) | ViewLine::Frame(s) => s,
        }
    }
}

/// Lines shown at `tick`, clipped to `rows`.
pub fn build_view_lines(playlist: &Playlist, tick: usize, rows: usize) -> Vec<ViewLine> {
    let mut lines = Vec::new();
    for entry in playlist.entries() {
        let n = entry.frame_count();
        let title = match entry.frame_index_at(tick) {
            Some(i) => format!("{} [{}/{}]", entry.animation.name, i + 1, n),
            None => format!("{} [-/{}]", entry.animation.name, n),
        };
        lines.push(ViewLine::Title(title));
        if let Some(frame) = entry.frame_at(tick) {
            lines.extend(frame.split('\n').map(|l| ViewLine::Frame(l.to_string())));
        }
        if lines.len() >= rows {
            break;
        }
    }
    lines.truncate(rows);
    lines
}

/// Draw the animation area starting at the top row.
pub fn render_frames<W: Write>(out: &mut W, lines: &[ViewLine], cols: u16, rows: u16) -> Result<()> {
    const ACCENT: &str = "\x1b[32m";
    const RESET: &str = "\x1b[0m";

    let mut output = String::with_capacity(rows as usize * (cols as usize + 16));
    for row in 0..rows as usize {
        output.push_str(&format!("\x1b[{};1H\x1b[2K", row + 1)); // Move + clear line
        match lines.get(row) {
            Some(ViewLine::Title(t)) => {
                output.push_str(ACCENT);
                output.push_str(truncate_line(t, cols as usize));
                output.push_str(RESET);
            }
            Some(ViewLine::Frame(f)) => output.push_str(truncate_line(f, cols as usize)),
            None => {}
        }
    }
    write!(out, "{}", output)?;
    Ok(())
}
