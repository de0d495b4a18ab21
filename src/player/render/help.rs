//! Key reference overlay for the native player.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use unicode_width::UnicodeWidthStr;

use crate::frame::pad_line;

/// Key bindings grouped by section.
pub const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Playback",
        &[
            ("Space", "Pause / resume"),
            ("+ / -", "Faster / slower"),
            ("Home", "Back to the first tick"),
        ],
    ),
    ("Paused", &[("<- / ->", "Step one tick")]),
    (
        "General",
        &[("?", "Toggle this help"), ("q / Esc", "Quit")],
    ),
];

const TITLE: &str = "animascii player";
const FOOTER: &str = "any key closes this help";
const KEY_COLUMN: usize = 10;

/// Lines of the help box, all of the same display width.
pub fn help_lines() -> Vec<String> {
    let mut body = vec![TITLE.to_string(), String::new()];
    for (section, keys) in HELP_SECTIONS {
        body.push((*section).to_string());
        for (key, action) in *keys {
            body.push(format!("  {}{action}", pad_line(key, KEY_COLUMN)));
        }
        body.push(String::new());
    }
    body.push(FOOTER.to_string());

    let inner = body.iter().map(|l| l.width()).max().unwrap_or(0) + 2;
    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format!("┌{}┐", "─".repeat(inner)));
    for line in &body {
        lines.push(format!("│ {} │", pad_line(line, inner - 2)));
    }
    lines.push(format!("└{}┘", "─".repeat(inner)));
    lines
}

/// Top-left corner that centers a `w` x `h` box.
pub fn help_origin(term_cols: u16, term_rows: u16, w: usize, h: usize) -> (u16, u16) {
    let col = (term_cols as usize).saturating_sub(w) / 2;
    let row = (term_rows as usize).saturating_sub(h) / 2;
    (col as u16, row as u16)
}

/// Clear the screen and draw the help box centered.
pub fn render_help<W: Write>(out: &mut W, width: u16, height: u16) -> Result<()> {
    let lines = help_lines();
    let box_width = lines.first().map(|l| l.width()).unwrap_or(0);
    let (col, row) = help_origin(width, height, box_width, lines.len());

    queue!(out, Clear(ClearType::All), SetForegroundColor(Color::Green))?;
    for (i, line) in lines.iter().enumerate() {
        queue!(out, MoveTo(col, row + i as u16), Print(line))?;
    }
    queue!(out, ResetColor)?;
    Ok(())
}
