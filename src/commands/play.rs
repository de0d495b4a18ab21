//! `animascii play`

use anyhow::Result;

use animascii::cli::PlaybackArgs;
use animascii::player::{self, PlaybackResult};

use super::{build_playlist, Session};

#[cfg(not(tarpaulin_include))]
pub fn handle(animations: &[String], playback: &PlaybackArgs, plain: bool, session: &Session) -> Result<()> {
    let library = session.open_library()?;
    let playlist = build_playlist(animations, &library, session.loops(playback)?)?;
    let delay = playlist.tick_delay(playback.delay, session.config.player.delay_ms);

    match player::play(&playlist, delay, plain)? {
        PlaybackResult::Finished => tracing::debug!("playback finished"),
        PlaybackResult::Interrupted => tracing::debug!("playback interrupted"),
    }
    Ok(())
}
