//! `animascii export`

use std::path::Path;

use anyhow::{Context, Result};

use animascii::asciicast::export_playlist;
use animascii::cli::PlaybackArgs;
use animascii::theme::current_theme;

use super::{build_playlist, Session};

pub fn handle(
    animations: &[String],
    out: &Path,
    title: Option<&str>,
    playback: &PlaybackArgs,
    session: &Session,
) -> Result<()> {
    let library = session.open_library()?;
    let playlist = build_playlist(animations, &library, session.loops(playback)?)?;
    if playlist.has_infinite_entries() {
        tracing::warn!("infinite loops are exported as a single loop");
    }
    let delay = playlist.tick_delay(playback.delay, session.config.player.delay_ms);

    let cast = export_playlist(&playlist, delay, title);
    cast.write(out)
        .with_context(|| format!("Failed to write {}", out.display()))?;

    let theme = current_theme();
    println!(
        "{}",
        theme.success_text(&format!(
            "Exported {} frames ({:.1}s) to {}",
            cast.outputs().len(),
            cast.duration(),
            out.display()
        ))
    );
    Ok(())
}
