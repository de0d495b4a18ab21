//! ASCII rendering pipeline.
//!
//! - [`charset`] - brightness lookup tables
//! - [`image`] - still images to a single text frame
//! - [`video`] - GIFs and videos to an [`Animation`](crate::animation::Animation)

pub mod charset;
pub mod image;
pub mod video;

use std::path::PathBuf;

pub use charset::{Charset, CharsetError};
pub use image::{render_image, render_path, render_rgba, RenderMode, RenderOptions};
pub use video::{render_video, VideoOptions};

/// Errors raised by the rendering pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to decode image: {0}")]
    Image(#[from] ::image::ImageError),

    #[error("invalid render size: {0}")]
    InvalidSize(String),

    #[error("invalid charset: {0}")]
    Charset(#[from] CharsetError),

    #[error("video decoding failed: {0}")]
    Video(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    pub fn video(msg: impl Into<String>) -> Self {
        Self::Video(msg.into())
    }
}
