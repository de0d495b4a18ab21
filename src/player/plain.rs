//! Line-oriented player for pipes and dumb terminals.
//!
//! Each tick is written as the frames of every entry followed by a blank
//! line. Entries that loop forever are played once.

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Result;

use super::playlist::Playlist;

/// Write every tick of the playlist, sleeping `tick_delay` between ticks.
///
/// Returns the number of ticks written.
pub fn play_plain<W: Write>(out: &mut W, playlist: &Playlist, tick_delay: Duration) -> Result<usize> {
    let playlist = playlist.single_pass();
    let mut tick = 0;
    while !playlist.is_finished(tick) {
        if tick > 0 {
            writeln!(out)?;
            if !tick_delay.is_zero() {
                thread::sleep(tick_delay);
            }
        }
        for frame in playlist.frames_at(tick).into_iter().flatten() {
            writeln!(out, "{frame}")?;
        }
        out.flush()?;
        tick += 1;
    }
    Ok(tick)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Animation;
    use crate::player::playlist::LoopCount;

    fn anim(frames: &[&str]) -> Animation {
        Animation::from_frames("a", frames.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn ticks_are_separated_by_blank_lines() {
        let mut list = Playlist::default();
        list.push(anim(&["1", "2"]), LoopCount::Times(1));

        let mut buf = Vec::new();
        let ticks = play_plain(&mut buf, &list, Duration::ZERO).unwrap();

        assert_eq!(ticks, 2);
        assert_eq!(String::from_utf8(buf).unwrap(), "1\n\n2\n");
    }

    #[test]
    fn infinite_entries_play_once() {
        let mut list = Playlist::default();
        list.push(anim(&["a", "b"]), LoopCount::Infinite);
        list.push(anim(&["x"]), LoopCount::Times(3));

        let mut buf = Vec::new();
        let ticks = play_plain(&mut buf, &list, Duration::ZERO).unwrap();

        assert_eq!(ticks, 3);
        assert_eq!(String::from_utf8(buf).unwrap(), "a\nx\n\nb\nx\n\nb\nx\n");
    }

    #[test]
    fn empty_playlist_writes_nothing() {
        let mut buf = Vec::new();
        assert_eq!(play_plain(&mut buf, &Playlist::default(), Duration::ZERO).unwrap(), 0);
        assert!(buf.is_empty());
    }
}
