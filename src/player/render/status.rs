//! Status bar rendering for the native player.
//!
//! Displays playback state, speed, tick counter and keyboard shortcuts.

use std::io::Write;

use anyhow::Result;

/// Render a separator line.
pub fn render_separator_line<W: Write>(out: &mut W, width: u16, row: u16) -> Result<()> {
    let mut output = String::with_capacity(width as usize * 3 + 20);
    output.push_str(&format!("\x1b[{};1H\x1b[90m", row + 1)); // Move + dark gray
    for _ in 0..width {
        output.push('─');
    }
    output.push_str("\x1b[0m");
    write!(out, "{}", output)?;
    Ok(())
}

/// Render the status/controls bar.
///
/// `total_ticks` is `None` for playlists that loop forever.
pub fn render_status_bar<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    paused: bool,
    speed: f64,
    tick: usize,
    total_ticks: Option<usize>,
) -> Result<()> {
    const WHITE: &str = "\x1b[97m";
    const DARK_GREY: &str = "\x1b[90m";
    const CYAN: &str = "\x1b[36m";
    const RESET: &str = "\x1b[0m";

    let mut output = String::with_capacity(256);
    let mut visible_len: usize = 0;

    output.push_str(&format!("\x1b[{};1H", row + 1));

    output.push_str(WHITE);
    output.push(' ');
    visible_len += 1;

    // State icon (▶ and ⏸ are double-width unicode)
    let state = if paused { "▶  " } else { "⏸  " };
    output.push_str(state);
    visible_len += 4;

    output.push_str(DARK_GREY);
    output.push_str("spd:");
    visible_len += 4;
    output.push_str(WHITE);
    let speed_str = format!("{:.1}x ", speed);
    visible_len += speed_str.len();
    output.push_str(&speed_str);

    output.push_str(DARK_GREY);
    output.push_str("tick:");
    visible_len += 5;
    output.push_str(WHITE);
    let tick_str = match total_ticks {
        Some(total) => format!("{}/{} ", (tick + 1).min(total.max(1)), total),
        None => format!("{} ", tick + 1),
    };
    visible_len += tick_str.len();
    output.push_str(&tick_str);

    let hints: [(&str, &str); 5] = [
        ("space", if paused { ":play " } else { ":pause " }),
        ("←→", ":step "),
        ("+-", ":spd "),
        ("?", ":hlp "),
        ("q", ":quit"),
    ];
    output.push_str(DARK_GREY);
    output.push_str("│ ");
    visible_len += 2;
    for (key, action) in hints {
        output.push_str(CYAN);
        output.push_str(key);
        visible_len += key.chars().count();
        output.push_str(DARK_GREY);
        output.push_str(action);
        visible_len += action.len();
    }

    // Pad to full width to overwrite any leftover content
    let padding = (width as usize).saturating_sub(visible_len);
    for _ in 0..padding {
        output.push(' ');
    }

    output.push_str(RESET);
    write!(out, "{}", output)?;

    Ok(())
}
