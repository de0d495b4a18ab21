//! `animascii video`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use animascii::cli::RenderArgs;
use animascii::render::{render_video, VideoOptions};

use super::{default_width, render_options, write_animation, Session};

/// Arguments of the `video` subcommand.
pub struct VideoRequest {
    pub path: PathBuf,
    pub name: Option<String>,
    pub out: Option<PathBuf>,
    pub save: bool,
    pub max_frames: Option<usize>,
    pub speed_up: usize,
    pub render: RenderArgs,
}

impl VideoRequest {
    /// `--name`, else the file stem.
    fn animation_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("animation")
                .to_string()
        })
    }
}

#[cfg(not(tarpaulin_include))]
pub fn handle(req: &VideoRequest, session: &Session) -> Result<()> {
    if !req.path.exists() {
        bail!("File not found: {}", req.path.display());
    }
    let opts = render_options(&session.config, &req.render, default_width())?;
    let video_opts = VideoOptions {
        max_frames: req.max_frames,
        speed_up: req.speed_up,
    };

    let animation = render_video(&req.path, &req.animation_name(), &opts, &video_opts)
        .with_context(|| format!("Failed to convert {}", req.path.display()))?;
    tracing::info!(frames = animation.frame_count(), delay_ms = ?animation.frame_delay_ms, "converted video");

    write_animation(&animation, req.out.as_deref(), req.save, session)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(path: &str, name: Option<&str>) -> VideoRequest {
        VideoRequest {
            path: PathBuf::from(path),
            name: name.map(str::to_string),
            out: None,
            save: false,
            max_frames: None,
            speed_up: 1,
            render: RenderArgs::default(),
        }
    }

    #[test]
    fn name_defaults_to_file_stem() {
        assert_eq!(request("clips/cat jump.gif", None).animation_name(), "cat jump");
        assert_eq!(request("clips/cat.gif", Some("Kitty")).animation_name(), "Kitty");
    }
}
