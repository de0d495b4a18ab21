//! FIGlet text rendering.
//!
//! The `standard` font ships with `figlet-rs`. Additional fonts are plain
//! `.flf` files in a fonts directory and are addressed by file stem.

use std::fmt;
use std::path::{Path, PathBuf};

use figlet_rs::FIGfont;
use rand::seq::SliceRandom;
use rand::Rng;

/// Name of the built-in font.
pub const STANDARD_FONT: &str = "standard";

/// Errors raised while resolving or loading a font.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("font '{name}' not found (looked for {})", path.display())]
    NotFound { name: String, path: PathBuf },

    #[error("failed to load font {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    #[error("failed to load built-in font: {0}")]
    Builtin(String),
}

/// Which font to render with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontChoice {
    Standard,
    Named(String),
    Random,
}

impl FontChoice {
    pub fn parse(s: &str) -> Self {
        match s {
            "" | STANDARD_FONT => Self::Standard,
            "random" => Self::Random,
            name => Self::Named(name.to_string()),
        }
    }
}

impl fmt::Display for FontChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str(STANDARD_FONT),
            Self::Named(name) => f.write_str(name),
            Self::Random => f.write_str("random"),
        }
    }
}

/// Load the font for `choice`, resolving names against `fonts_dir`.
pub fn load_font(choice: &FontChoice, fonts_dir: Option<&Path>) -> Result<FIGfont, FontError> {
    match choice {
        FontChoice::Standard => FIGfont::standard().map_err(FontError::Builtin),
        FontChoice::Named(name) => load_named(name, fonts_dir),
        FontChoice::Random => {
            let fonts = available_fonts(fonts_dir);
            let name = pick_font(&fonts, &mut rand::thread_rng()).unwrap_or(STANDARD_FONT);
            tracing::debug!(font = name, "picked random font");
            if name == STANDARD_FONT {
                FIGfont::standard().map_err(FontError::Builtin)
            } else {
                load_named(name, fonts_dir)
            }
        }
    }
}

fn load_named(name: &str, fonts_dir: Option<&Path>) -> Result<FIGfont, FontError> {
    if name == STANDARD_FONT {
        return FIGfont::standard().map_err(FontError::Builtin);
    }
    let path = if name.ends_with(".flf") {
        PathBuf::from(name)
    } else {
        fonts_dir
            .map(|dir| dir.join(format!("{name}.flf")))
            .unwrap_or_else(|| PathBuf::from(format!("{name}.flf")))
    };
    if !path.is_file() {
        return Err(FontError::NotFound {
            name: name.to_string(),
            path,
        });
    }
    let content = std::fs::read_to_string(&path).map_err(|e| FontError::Load {
        path: path.clone(),
        message: e.to_string(),
    })?;
    FIGfont::from_content(&content).map_err(|message| FontError::Load { path, message })
}

/// Uniform pick from a font list.
pub fn pick_font<'a, R: Rng + ?Sized>(fonts: &'a [String], rng: &mut R) -> Option<&'a str> {
    fonts.choose(rng).map(String::as_str)
}

/// `standard` plus every `.flf` stem found in `fonts_dir`, sorted.
pub fn available_fonts(fonts_dir: Option<&Path>) -> Vec<String> {
    let mut fonts = vec![STANDARD_FONT.to_string()];
    if let Some(dir) = fonts_dir {
        match std::fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.extension().and_then(|e| e.to_str()) != Some("flf") {
                        continue;
                    }
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        if stem != STANDARD_FONT {
                            fonts.push(stem.to_string());
                        }
                    }
                }
            }
            Err(e) => tracing::debug!(dir = %dir.display(), error = %e, "fonts directory unreadable"),
        }
    }
    fonts.sort();
    fonts
}

/// Render `text` line by line and stack the blocks.
///
/// Characters the font does not define are dropped. A line with nothing
/// renderable becomes a single empty line.
pub fn render_text(text: &str, font: &FIGfont) -> String {
    text.split('\n')
        .map(|line| match font.convert(line.trim_end_matches('\r')) {
            Some(figure) => figure.to_string().trim_end_matches('\n').to_string(),
            None => String::new(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
