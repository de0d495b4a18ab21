//! Border transforms applied to every frame of an animation.

use super::Transform;
use crate::frame::{dimensions, pad_line};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaddingError {
    #[error("padding string must not be empty")]
    EmptyPad,
}

/// Surrounds each frame with a repeated string.
///
/// ```text
/// ooooo
/// oabco    pad "o", x = 1, y = 1
/// ooooo
/// ```
///
/// The top and bottom rows are `pad` repeated `x` times on each side and
/// the frame width filled by cycling through `pad`. Content rows get `pad`
/// repeated `x` times on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRepeat {
    pad: String,
    x: usize,
    y: usize,
}

impl Default for SimpleRepeat {
    fn default() -> Self {
        Self {
            pad: "o".to_string(),
            x: 1,
            y: 1,
        }
    }
}

impl SimpleRepeat {
    pub fn new(pad: impl Into<String>, x: usize, y: usize) -> Result<Self, PaddingError> {
        let pad = pad.into();
        if pad.is_empty() {
            return Err(PaddingError::EmptyPad);
        }
        Ok(Self { pad, x, y })
    }

    fn border(&self, width: usize) -> String {
        let side = self.pad.repeat(self.x);
        let len = self.pad.chars().count();
        let mut middle = self.pad.repeat(width / len);
        middle.extend(self.pad.chars().take(width % len));
        format!("{side}{middle}{side}")
    }

    pub fn pad_frame(&self, frame: &str) -> String {
        let (width, _) = dimensions(frame);
        let side = self.pad.repeat(self.x);
        let border = self.border(width);

        let mut lines = Vec::new();
        lines.extend(std::iter::repeat(border.clone()).take(self.y));
        for line in frame.split('\n') {
            lines.push(format!("{side}{}{side}", pad_line(line, width)));
        }
        lines.extend(std::iter::repeat(border).take(self.y));
        lines.join("\n")
    }
}

impl Transform for SimpleRepeat {
    fn transform(&mut self, frames: &mut Vec<String>) {
        for frame in frames.iter_mut() {
            *frame = self.pad_frame(frame);
        }
    }
}

/// Draws a box around each frame.
///
/// ```text
/// .---.
/// |abc|
/// L---⅃
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FramePad;

impl FramePad {
    pub fn pad_frame(frame: &str) -> String {
        let (width, _) = dimensions(frame);
        let rule = "-".repeat(width);

        let mut out = format!(".{rule}.");
        for line in frame.split('\n') {
            out.push_str("\n|");
            out.push_str(&pad_line(line, width));
            out.push('|');
        }
        out.push_str(&format!("\nL{rule}⅃"));
        out
    }
}

impl Transform for FramePad {
    fn transform(&mut self, frames: &mut Vec<String>) {
        for frame in frames.iter_mut() {
            *frame = Self::pad_frame(frame);
        }
    }
}
