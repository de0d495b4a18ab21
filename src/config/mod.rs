//! Configuration file
//!
//! TOML at `$ANIMASCII_CONFIG` or `<config_dir>/animascii/config.toml`.
//! Every section is `#[serde(default)]`, so partial files are fine and
//! `config migrate` can fill in whatever is missing.

mod migrate;

pub use migrate::{migrate_config, MigrateResult};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::player::LoopCount;
use crate::render::{Charset, RenderMode, RenderOptions};
use crate::text::STANDARD_FONT;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "ANIMASCII_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub player: PlayerConfig,
    pub library: LibraryConfig,
    pub text: TextConfig,
}

/// Defaults for `image` and `video`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in cells, terminal width when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Preset name or literal ramp
    pub charset: String,
    pub invert: bool,
    pub mode: RenderMode,
    pub char_aspect: f32,
    pub edge_threshold: u8,
    pub keep_aspect: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let opts = RenderOptions::default();
        Self {
            width: None,
            charset: "standard".to_string(),
            invert: false,
            mode: opts.mode,
            char_aspect: opts.char_aspect,
            edge_threshold: opts.edge_threshold,
            keep_aspect: opts.keep_aspect,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Tick delay when neither `--delay` nor the animation sets one
    pub delay_ms: u64,
    /// Loops per animation, -1 for infinite
    pub loops: i64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            loops: 1,
        }
    }
}

impl PlayerConfig {
    pub fn loop_count(&self) -> Result<LoopCount> {
        LoopCount::from_i64(self.loops).map_err(|e| anyhow::anyhow!("[player] loops: {e}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Library directory, `<data_dir>/animascii/animations` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Font name, a `.flf` path, or `random`
    pub font: String,
    /// Extra directory searched for `.flf` fonts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonts_dir: Option<PathBuf>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font: STANDARD_FONT.to_string(),
            fonts_dir: None,
        }
    }
}

impl Config {
    /// Load from the default location. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote config");
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine the config directory")?;
        Ok(dir.join("animascii").join("config.toml"))
    }

    /// Configured library directory or the platform data directory.
    pub fn library_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.library.dir {
            return Ok(dir.clone());
        }
        let dir = dirs::data_dir().context("Could not determine the data directory")?;
        Ok(dir.join("animascii").join("animations"))
    }

    /// Render options from the `[render]` section. `width` falls back to
    /// `fallback_width` when the section leaves it unset.
    pub fn render_options(&self, fallback_width: u32) -> Result<RenderOptions> {
        let r = &self.render;
        let charset = Charset::from_spec(&r.charset)
            .with_context(|| format!("[render] charset '{}'", r.charset))?;
        Ok(RenderOptions {
            width: r.width.unwrap_or(fallback_width),
            height: None,
            keep_aspect: r.keep_aspect,
            char_aspect: r.char_aspect,
            mode: r.mode,
            charset: if r.invert { charset.inverted() } else { charset },
            edge_threshold: r.edge_threshold,
        })
    }
}
