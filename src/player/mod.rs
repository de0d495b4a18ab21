//! Terminal animation player
//!
//! - `playlist`: loop counts and per-tick frame selection
//! - `native`: full screen interactive player (crossterm)
//! - `plain`: line-oriented output for pipes and `--plain`
//!
//! # Architecture
//!
//! - `state`: PlaybackState and InputResult
//! - `input/`: Keyboard input handling
//! - `render/`: Animation area, progress bar, status bar, help overlay
//!
//! # Usage
//!
//! ```no_run
//! use animascii::animation::Animation;
//! use animascii::player::{play, LoopCount, Playlist};
//! use std::path::Path;
//! use std::time::Duration;
//!
//! let mut playlist = Playlist::default();
//! playlist.push(Animation::load(Path::new("spinner.json")).unwrap(), LoopCount::Infinite);
//! play(&playlist, Duration::from_millis(100), false).unwrap();
//! ```

pub(crate) mod input;
mod native;
mod plain;
pub mod playlist;
pub mod render;
pub mod state;

use std::io;
use std::time::Duration;

use anyhow::Result;

pub use native::{play_native, PlaybackResult};
pub use plain::play_plain;
pub use playlist::{LoopCount, Playlist, PlaylistEntry};
pub use state::{InputResult, PlaybackState};

/// Play with the native player on a terminal, plain output otherwise.
#[cfg(not(tarpaulin_include))]
pub fn play(playlist: &Playlist, tick_delay: Duration, plain: bool) -> Result<PlaybackResult> {
    if plain || !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stdin) {
        if playlist.has_infinite_entries() {
            tracing::warn!("infinite loops are played once without a terminal");
        }
        let mut stdout = io::stdout().lock();
        play_plain(&mut stdout, playlist, tick_delay)?;
        Ok(PlaybackResult::Finished)
    } else {
        play_native(playlist, tick_delay)
    }
}
