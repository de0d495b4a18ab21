//! `animascii gallery`

use anyhow::{bail, Result};

use animascii::cli::PlaybackArgs;
use animascii::tui::{run_gallery, GalleryOptions};

use super::Session;

#[cfg(not(tarpaulin_include))]
pub fn handle(playback: &PlaybackArgs, session: &Session) -> Result<()> {
    if !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stdin) {
        bail!("The gallery needs an interactive terminal");
    }
    let mut library = session.open_library()?;
    let options = GalleryOptions {
        delay_ms: playback.delay,
        default_delay_ms: session.config.player.delay_ms,
        loops: session.loops(playback)?,
    };
    run_gallery(&mut library, options)
}
