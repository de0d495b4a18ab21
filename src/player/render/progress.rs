//! Progress bar rendering for the native player.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;

/// Format a duration in seconds to MM:SS format.
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Fraction of the playlist played at `tick`.
///
/// Playlists that loop forever report progress through the current cycle of
/// length `cycle`.
pub fn progress_fraction(tick: usize, total_ticks: Option<usize>, cycle: usize) -> f64 {
    match total_ticks {
        Some(0) => 1.0,
        Some(total) => (tick as f64 / total as f64).clamp(0.0, 1.0),
        None if cycle == 0 => 0.0,
        None => (tick % cycle) as f64 / cycle as f64,
    }
}

/// Build the progress bar character array.
///
/// Returns the bar and the number of filled positions.
pub fn build_progress_bar_chars(bar_width: usize, progress: f64) -> (Vec<char>, usize) {
    let filled = ((bar_width as f64 * progress.clamp(0.0, 1.0)) as usize).min(bar_width);

    let mut bar: Vec<char> = vec!['─'; bar_width];
    if filled < bar_width {
        bar[filled] = '⏺';
    }
    (bar, filled)
}

/// Render the progress bar with elapsed and total time.
#[allow(clippy::too_many_arguments)]
pub fn render_progress_bar<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    tick: usize,
    total_ticks: Option<usize>,
    cycle: usize,
    tick_delay: Duration,
) -> Result<()> {
    let bar_width = (width as usize).saturating_sub(14); // Account for padding and time display
    let progress = progress_fraction(tick, total_ticks, cycle);
    let (bar, filled) = build_progress_bar_chars(bar_width, progress);

    let elapsed = tick_delay.as_secs_f64() * tick as f64;
    let total_str = match total_ticks {
        Some(total) => format_duration(tick_delay.as_secs_f64() * total as f64),
        None => "--:--".to_string(),
    };
    let time_display = format!(" {}/{}", format_duration(elapsed), total_str);

    let mut output = String::with_capacity(width as usize * 4);
    output.push_str(&format!("\x1b[{};1H", row + 1)); // Move cursor
    output.push_str("\x1b[48;5;236m "); // Dark gray background + padding

    const GREEN: &str = "\x1b[32m";
    const WHITE: &str = "\x1b[97m";
    const DARK_GREY: &str = "\x1b[90m";
    const GREY: &str = "\x1b[37m";

    output.push_str(GREEN);
    for (i, &c) in bar.iter().enumerate() {
        if i < filled {
            output.push('━');
        } else if i == filled {
            output.push_str(WHITE);
            output.push(c);
        } else {
            output.push_str(DARK_GREY);
            output.push(c);
        }
    }

    output.push_str(GREY);
    output.push_str(&time_display);

    let used_width = 1 + bar_width + time_display.len();
    let remaining = (width as usize).saturating_sub(used_width);
    for _ in 0..remaining {
        output.push(' ');
    }

    output.push_str("\x1b[0m");
    write!(out, "{}", output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_formats_correctly() {
        assert_eq!(format_duration(0.0), "00:00");
        assert_eq!(format_duration(65.0), "01:05");
        assert_eq!(format_duration(3661.0), "61:01");
    }

    #[test]
    fn format_duration_truncates_fractions() {
        assert_eq!(format_duration(0.9), "00:00");
        assert_eq!(format_duration(59.9), "00:59");
        assert_eq!(format_duration(-5.0), "00:00");
    }

    #[test]
    fn empty_bar_at_zero() {
        let (bar, filled) = build_progress_bar_chars(10, 0.0);
        assert_eq!(filled, 0);
        assert_eq!(bar[0], '⏺');
        assert_eq!(bar[1], '─');
    }

    #[test]
    fn full_bar_at_end() {
        let (bar, filled) = build_progress_bar_chars(10, 1.0);
        assert_eq!(filled, 10);
        assert!(bar.iter().all(|&c| c == '─'));
    }

    #[test]
    fn half_progress() {
        let (bar, filled) = build_progress_bar_chars(10, 0.5);
        assert_eq!(filled, 5);
        assert_eq!(bar[5], '⏺');
    }

    #[test]
    fn finite_progress_uses_total() {
        assert_eq!(progress_fraction(5, Some(10), 3), 0.5);
        assert_eq!(progress_fraction(20, Some(10), 3), 1.0);
        assert_eq!(progress_fraction(0, Some(0), 0), 1.0);
    }

    #[test]
    fn infinite_progress_wraps_per_cycle() {
        assert_eq!(progress_fraction(5, None, 4), 0.25);
        assert_eq!(progress_fraction(5, None, 0), 0.0);
    }

    #[test]
    fn progress_bar_shows_time() {
        let mut buf = Vec::new();
        render_progress_bar(&mut buf, 60, 0, 10, Some(20), 20, Duration::from_secs(1)).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains(" 00:10/00:20"));

        let mut buf = Vec::new();
        render_progress_bar(&mut buf, 60, 0, 3, None, 4, Duration::from_secs(1)).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains(" 00:03/--:--"));
    }
}
