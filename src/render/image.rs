//! Image to ASCII conversion.
//!
//! The source image is resampled to one pixel per output cell, reduced to an
//! intensity grid (luma, or Sobel magnitude for the edge modes) and every
//! cell is replaced by a glyph from the [`Charset`].

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma, RgbaImage};
use serde::{Deserialize, Serialize};

use super::charset::Charset;
use super::RenderError;

/// What the intensity of a cell is derived from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Pixel brightness.
    #[default]
    Brightness,
    /// Edge strength (Sobel magnitude).
    Edges,
    /// Edge direction glyphs (`- | / \`) where edges are strong enough.
    Outline,
}

/// Options controlling grid size and glyph selection.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Output width in cells.
    pub width: u32,
    /// Output height in cells. Derived from the aspect ratio when `None`.
    pub height: Option<u32>,
    /// Fit inside `width x height` instead of stretching to it.
    pub keep_aspect: bool,
    /// Height/width ratio of a terminal cell.
    pub char_aspect: f32,
    pub mode: RenderMode,
    pub charset: Charset,
    /// Minimum Sobel magnitude counted as an edge.
    pub edge_threshold: u8,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 80,
            height: None,
            keep_aspect: true,
            char_aspect: 2.0,
            mode: RenderMode::Brightness,
            charset: Charset::default(),
            edge_threshold: 64,
        }
    }
}

impl RenderOptions {
    /// Grid size (columns, rows) for a source image of the given size.
    pub fn grid_size(&self, img_width: u32, img_height: u32) -> Result<(u32, u32), RenderError> {
        if img_width == 0 || img_height == 0 {
            return Err(RenderError::InvalidSize(format!(
                "source image is {}x{}",
                img_width, img_height
            )));
        }
        if self.width == 0 || self.height == Some(0) {
            return Err(RenderError::InvalidSize(
                "output width and height must be at least 1".to_string(),
            ));
        }
        if !self.char_aspect.is_finite() || self.char_aspect <= 0.0 {
            return Err(RenderError::InvalidSize(format!(
                "character aspect ratio must be positive, got {}",
                self.char_aspect
            )));
        }

        let ratio = img_height as f64 / img_width as f64 / self.char_aspect as f64;
        let rows_for = |cols: u32| ((cols as f64 * ratio).round() as u32).max(1);

        let size = match self.height {
            None => (self.width, rows_for(self.width)),
            Some(rows) if !self.keep_aspect => (self.width, rows),
            Some(rows) => {
                let ideal = rows_for(self.width);
                if ideal <= rows {
                    (self.width, ideal)
                } else {
                    let cols = ((rows as f64 / ratio).round() as u32).clamp(1, self.width);
                    (cols, rows)
                }
            }
        };
        Ok(size)
    }
}

/// Render an image file.
pub fn render_path(path: &Path, opts: &RenderOptions) -> Result<String, RenderError> {
    tracing::debug!(path = %path.display(), "decoding image");
    let img = image::open(path)?;
    render_image(&img, opts)
}

/// Render a decoded image.
pub fn render_image(img: &DynamicImage, opts: &RenderOptions) -> Result<String, RenderError> {
    render_rgba(&img.to_rgba8(), opts)
}

/// Render an RGBA buffer.
pub fn render_rgba(img: &RgbaImage, opts: &RenderOptions) -> Result<String, RenderError> {
    let (cols, rows) = opts.grid_size(img.width(), img.height())?;

    let resized;
    let grid_src = if (cols, rows) == img.dimensions() {
        img
    } else {
        resized = image::imageops::resize(img, cols, rows, FilterType::Triangle);
        &resized
    };

    let intensity = intensity_grid(grid_src);
    let out = match opts.mode {
        RenderMode::Brightness => map_grid(&intensity, &opts.charset),
        RenderMode::Edges => {
            let edges = sobel(&intensity);
            let magnitude = GrayImage::from_fn(cols, rows, |x, y| {
                let m = edges.magnitude(x, y);
                Luma([if m < opts.edge_threshold { 0 } else { m }])
            });
            map_grid(&magnitude, &opts.charset)
        }
        RenderMode::Outline => outline(&sobel(&intensity), opts),
    };
    Ok(out)
}

/// Luma scaled by alpha (transparent pixels read as black).
fn intensity_grid(img: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        let luma = (2126 * r as u32 + 7152 * g as u32 + 722 * b as u32) / 10_000;
        Luma([(luma * a as u32 / 255) as u8])
    })
}

fn map_grid(grid: &GrayImage, charset: &Charset) -> String {
    let glyph_len = charset.darkest().len().max(1);
    let mut out =
        String::with_capacity((grid.width() as usize * glyph_len + 1) * grid.height() as usize);
    for y in 0..grid.height() {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..grid.width() {
            out.push_str(charset.lookup(grid.get_pixel(x, y).0[0]));
        }
    }
    out
}

/// Sobel gradients of an intensity grid.
struct Gradients {
    width: u32,
    gx: Vec<i32>,
    gy: Vec<i32>,
}

impl Gradients {
    fn at(&self, x: u32, y: u32) -> (i32, i32) {
        let i = (y * self.width + x) as usize;
        (self.gx[i], self.gy[i])
    }

    /// Gradient magnitude scaled so a full black/white step reads as 255.
    fn magnitude(&self, x: u32, y: u32) -> u8 {
        let (gx, gy) = self.at(x, y);
        let m = ((gx * gx + gy * gy) as f64).sqrt() / 4.0;
        m.round().min(255.0) as u8
    }
}

fn sobel(grid: &GrayImage) -> Gradients {
    let (w, h) = grid.dimensions();
    let px = |x: i64, y: i64| -> i32 {
        let x = x.clamp(0, w as i64 - 1) as u32;
        let y = y.clamp(0, h as i64 - 1) as u32;
        grid.get_pixel(x, y).0[0] as i32
    };

    let mut gx = Vec::with_capacity((w * h) as usize);
    let mut gy = Vec::with_capacity((w * h) as usize);
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            gx.push(
                px(x + 1, y - 1) + 2 * px(x + 1, y) + px(x + 1, y + 1)
                    - px(x - 1, y - 1)
                    - 2 * px(x - 1, y)
                    - px(x - 1, y + 1),
            );
            gy.push(
                px(x - 1, y + 1) + 2 * px(x, y + 1) + px(x + 1, y + 1)
                    - px(x - 1, y - 1)
                    - 2 * px(x, y - 1)
                    - px(x + 1, y - 1),
            );
        }
    }
    Gradients { width: w, gx, gy }
}

/// Glyph running along an edge whose gradient is `(gx, gy)` (y pointing down).
fn direction_glyph(gx: i32, gy: i32) -> char {
    let mut deg = (gy as f64).atan2(gx as f64).to_degrees();
    if deg < 0.0 {
        deg += 180.0;
    }
    match deg {
        d if !(22.5..157.5).contains(&d) => '|',
        d if d < 67.5 => '/',
        d if d < 112.5 => '-',
        _ => '\\',
    }
}

/// Cells with zero gradient have no direction, so the threshold is at least 1.
fn outline(grad: &Gradients, opts: &RenderOptions) -> String {
    let rows = grad.gx.len() as u32 / grad.width.max(1);
    let background = opts.charset.darkest();
    let mut out = String::new();
    for y in 0..rows {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..grad.width {
            if grad.magnitude(x, y) >= opts.edge_threshold.max(1) {
                let (gx, gy) = grad.at(x, y);
                out.push(direction_glyph(gx, gy));
            } else {
                out.push_str(background);
            }
        }
    }
    out
}
