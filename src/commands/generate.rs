//! `animascii generate`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use animascii::cli::PadStyle;
use animascii::generate::{BuildUpText, FigletText, FramePad, Pipeline, SimpleRepeat};
use animascii::text::{load_font, FontChoice};
use animascii::Animation;

use super::{write_animation, Session};

/// Arguments of the `generate` subcommand.
pub struct GenerateRequest {
    pub text: String,
    pub name: Option<String>,
    pub font: Option<String>,
    pub pad: PadStyle,
    pub pad_str: String,
    pub pad_x: usize,
    pub pad_y: usize,
    pub out: Option<PathBuf>,
    pub save: bool,
}

/// Run the build-up pipeline described by `req`.
pub fn build(req: &GenerateRequest, session: &Session) -> Result<Animation> {
    let name = req.name.clone().unwrap_or_else(|| req.text.clone());
    let mut pipeline = Pipeline::new(name, req.text.clone(), Box::new(BuildUpText));

    if let Some(font) = &req.font {
        let choice = FontChoice::parse(font);
        let font = load_font(&choice, session.config.text.fonts_dir.as_deref())
            .with_context(|| format!("Failed to load font '{choice}'"))?;
        pipeline = pipeline.with_pre(FigletText::new(font));
    }

    pipeline = match req.pad {
        PadStyle::None => pipeline,
        PadStyle::Simple => pipeline.with_post(SimpleRepeat::new(req.pad_str.clone(), req.pad_x, req.pad_y)?),
        PadStyle::Frame => pipeline.with_post(FramePad),
    };

    let animation = pipeline.run();
    if animation.is_empty() {
        bail!("Nothing to animate: the text needs at least two columns");
    }
    Ok(animation)
}

#[cfg(not(tarpaulin_include))]
pub fn handle(req: &GenerateRequest, session: &Session) -> Result<()> {
    let animation = build(req, session)?;
    write_animation(&animation, req.out.as_deref(), req.save, session)
}
