//! `animascii text` and `animascii fonts`

use anyhow::{Context, Result};

use animascii::text::{available_fonts, load_font, render_text, FontChoice};
use animascii::theme::current_theme;

use super::Session;

pub fn handle(text: &str, font: Option<&str>, session: &Session) -> Result<()> {
    let choice = FontChoice::parse(font.unwrap_or(&session.config.text.font));
    let font = load_font(&choice, session.config.text.fonts_dir.as_deref())
        .with_context(|| format!("Failed to load font '{choice}'"))?;
    println!("{}", render_text(text, &font));
    Ok(())
}

pub fn handle_fonts(session: &Session) -> Result<()> {
    let theme = current_theme();
    let default = FontChoice::parse(&session.config.text.font).to_string();
    for font in available_fonts(session.config.text.fonts_dir.as_deref()) {
        if font == default {
            println!("{} {}", font, theme.secondary_text("(default)"));
        } else {
            println!("{font}");
        }
    }
    Ok(())
}
