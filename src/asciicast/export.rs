use std::time::Duration;

use super::{AsciicastFile, Event, Header};
use crate::player::Playlist;

/// Clear screen and move the cursor home.
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Render a playlist as an asciicast recording.
///
/// One output event per tick redraws every entry stacked top to bottom.
/// A marker labelled with the animation name is emitted whenever an entry
/// starts a loop. Entries that loop forever are exported once.
pub fn export_playlist(playlist: &Playlist, tick_delay: Duration, title: Option<&str>) -> AsciicastFile {
    let playlist = playlist.single_pass();
    let cols = playlist.max_frame_dimensions().0.max(1);
    let rows = playlist
        .entries()
        .iter()
        .map(|e| e.animation.dimensions().1)
        .sum::<usize>()
        .max(1);

    let mut header = Header::new(cols as u32, rows as u32);
    header.title = title.map(str::to_string);
    let mut cast = AsciicastFile::new(header);

    let step = tick_delay.as_secs_f64();
    let total = playlist.total_ticks().unwrap_or(0);
    for tick in 0..total {
        let mut pending = if tick == 0 { 0.0 } else { step };

        for entry in playlist.entries() {
            let n = entry.frame_count();
            if n == 0 || entry.is_finished_at(tick) || tick % n != 0 {
                continue;
            }
            let loop_no = tick / n + 1;
            let label = if loop_no == 1 {
                entry.animation.name.clone()
            } else {
                format!("{} #{}", entry.animation.name, loop_no)
            };
            cast.events.push(Event::marker(pending, label));
            pending = 0.0;
        }

        let screen = playlist
            .frames_at(tick)
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n")
            .replace('\n', "\r\n");
        cast.events.push(Event::output(pending, format!("{CLEAR}{screen}")));
    }

    tracing::debug!(events = cast.events.len(), cols, rows, "exported playlist");
    cast
}
