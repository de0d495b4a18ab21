//! `animascii image`

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use animascii::cli::RenderArgs;
use animascii::render::render_path;
use animascii::theme::current_theme;

use super::{default_width, render_options, Session};

#[cfg(not(tarpaulin_include))]
pub fn handle(path: &Path, args: &RenderArgs, out: Option<&Path>, session: &Session) -> Result<()> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    let opts = render_options(&session.config, args, default_width())?;
    let art = render_path(path, &opts).with_context(|| format!("Failed to render {}", path.display()))?;

    match out {
        Some(out) => {
            fs::write(out, format!("{art}\n")).with_context(|| format!("Failed to write {}", out.display()))?;
            let theme = current_theme();
            println!("{}", theme.success_text(&format!("Wrote {}", out.display())));
        }
        None => println!("{art}"),
    }
    Ok(())
}
