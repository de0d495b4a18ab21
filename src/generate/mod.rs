//! Animation generators and frame transforms.
//!
//! A [`Pipeline`] turns a piece of text into an [`Animation`]:
//!
//! ```text
//! text ──► pre-processors ──► generator ──► transforms ──► Animation
//! ```
//!
//! Pre-processors rewrite the input text (e.g. FIGlet rendering), the
//! generator expands it into frames, and transforms post-process the frame
//! list in order.

mod build_up;
pub mod padding;

use figlet_rs::FIGfont;

use crate::animation::Animation;
use crate::text::render_text;

pub use build_up::BuildUpText;
pub use padding::{FramePad, PaddingError, SimpleRepeat};

/// Produces animation frames from input text.
pub trait Generator {
    fn generate(&self, text: &str) -> Vec<String>;
}

/// A transform that modifies a frame list in place.
pub trait Transform {
    fn transform(&mut self, frames: &mut Vec<String>);
}

/// Apply transforms in order.
pub fn apply_transforms(frames: &mut Vec<String>, transforms: &mut [Box<dyn Transform>]) {
    for t in transforms.iter_mut() {
        t.transform(frames);
    }
}

/// Rewrites the input text before generation.
pub trait PreProcess {
    fn process(&self, text: &str) -> String;
}

/// Renders the input text with a FIGlet font.
pub struct FigletText {
    font: FIGfont,
}

impl FigletText {
    pub fn new(font: FIGfont) -> Self {
        Self { font }
    }
}

impl PreProcess for FigletText {
    fn process(&self, text: &str) -> String {
        render_text(text, &self.font)
    }
}

/// Text-to-animation pipeline.
pub struct Pipeline {
    pub name: String,
    pub text: String,
    pub pre: Vec<Box<dyn PreProcess>>,
    pub generator: Box<dyn Generator>,
    pub post: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>, text: impl Into<String>, generator: Box<dyn Generator>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            pre: Vec::new(),
            generator,
            post: Vec::new(),
        }
    }

    pub fn with_pre(mut self, pre: impl PreProcess + 'static) -> Self {
        self.pre.push(Box::new(pre));
        self
    }

    pub fn with_post(mut self, post: impl Transform + 'static) -> Self {
        self.post.push(Box::new(post));
        self
    }

    pub fn run(mut self) -> Animation {
        let text = self
            .pre
            .iter()
            .fold(self.text, |text, p| p.process(&text));

        let mut frames = self.generator.generate(&text);
        tracing::debug!(frames = frames.len(), "generated frames");
        apply_transforms(&mut frames, &mut self.post);

        Animation::from_frames(self.name, frames)
    }
}
