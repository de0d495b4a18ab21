//! Brightness lookup tables.
//!
//! A [`Charset`] splits the 0..=255 intensity range into buckets and maps each
//! bucket to a fixed glyph string. Lookup is a binary search over the bucket
//! upper bounds.

use unicode_width::UnicodeWidthStr;

/// Ten-step ramp from sparse to dense.
pub const STANDARD_RAMP: &str = " .:-=+*#%@";

/// Shade blocks.
pub const BLOCKS_RAMP: &str = " ░▒▓█";

/// Two-level ramp for line-art style output.
pub const BINARY_RAMP: &str = " #";

/// Long ramp, dense first. Reversed when building the preset.
const DETAILED_DENSE_FIRST: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";

/// Names accepted by [`Charset::from_spec`] as presets.
pub const PRESET_NAMES: &[&str] = &["standard", "blocks", "detailed", "binary"];

/// Errors raised while building a charset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharsetError {
    #[error("charset has no buckets")]
    Empty,

    #[error("ramp has {0} glyphs, at most 256 are supported")]
    RampTooLong(usize),

    #[error("bucket bounds must be strictly increasing (bucket {index} has bound {upper})")]
    NotIncreasing { index: usize, upper: u8 },

    #[error("last bucket must end at 255, got {0}")]
    OpenEnded(u8),

    #[error("bucket {0} has an empty glyph")]
    EmptyGlyph(usize),
}

/// A single intensity range and its replacement glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Inclusive upper bound of the range.
    pub upper: u8,
    /// Glyph emitted for intensities in this range.
    pub glyph: String,
}

/// Ordered brightness lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    buckets: Vec<Bucket>,
}

impl Default for Charset {
    fn default() -> Self {
        // The standard ramp is ASCII and well under 256 glyphs.
        Self::ramp_unchecked(STANDARD_RAMP)
    }
}

impl Charset {
    /// Build equally sized buckets, one per character of `ramp`.
    ///
    /// The first character is used for the darkest intensities.
    pub fn from_ramp(ramp: &str) -> Result<Self, CharsetError> {
        let n = ramp.chars().count();
        if n == 0 {
            return Err(CharsetError::Empty);
        }
        if n > 256 {
            return Err(CharsetError::RampTooLong(n));
        }
        Ok(Self::ramp_unchecked(ramp))
    }

    fn ramp_unchecked(ramp: &str) -> Self {
        let n = ramp.chars().count();
        let buckets = ramp
            .chars()
            .enumerate()
            .map(|(k, c)| Bucket {
                // Largest v with v * n / 256 == k
                upper: (((k + 1) * 256).div_ceil(n) - 1) as u8,
                glyph: c.to_string(),
            })
            .collect();
        Self { buckets }
    }

    /// Build a charset from explicit `(upper, glyph)` pairs.
    pub fn from_buckets<I, S>(pairs: I) -> Result<Self, CharsetError>
    where
        I: IntoIterator<Item = (u8, S)>,
        S: Into<String>,
    {
        let buckets: Vec<Bucket> = pairs
            .into_iter()
            .map(|(upper, glyph)| Bucket {
                upper,
                glyph: glyph.into(),
            })
            .collect();

        let Some(last) = buckets.last() else {
            return Err(CharsetError::Empty);
        };
        if last.upper != u8::MAX {
            return Err(CharsetError::OpenEnded(last.upper));
        }
        for (index, bucket) in buckets.iter().enumerate() {
            if bucket.glyph.is_empty() {
                return Err(CharsetError::EmptyGlyph(index));
            }
            if index > 0 && bucket.upper <= buckets[index - 1].upper {
                return Err(CharsetError::NotIncreasing {
                    index,
                    upper: bucket.upper,
                });
            }
        }

        Ok(Self { buckets })
    }

    /// Resolve a preset name, or treat the value as a literal ramp.
    pub fn from_spec(spec: &str) -> Result<Self, CharsetError> {
        match spec {
            "standard" => Self::from_ramp(STANDARD_RAMP),
            "blocks" => Self::from_ramp(BLOCKS_RAMP),
            "binary" => Self::from_ramp(BINARY_RAMP),
            "detailed" => {
                let ramp: String = DETAILED_DENSE_FIRST.chars().rev().collect();
                Self::from_ramp(&ramp)
            }
            literal => Self::from_ramp(literal),
        }
    }

    /// Same bounds with the glyph order reversed (for light backgrounds).
    pub fn inverted(&self) -> Self {
        let glyphs = self.buckets.iter().rev().map(|b| b.glyph.clone());
        let buckets = self
            .buckets
            .iter()
            .zip(glyphs)
            .map(|(b, glyph)| Bucket {
                upper: b.upper,
                glyph,
            })
            .collect();
        Self { buckets }
    }

    /// Glyph for an intensity value.
    pub fn lookup(&self, value: u8) -> &str {
        let idx = self.buckets.partition_point(|b| b.upper < value);
        // The last bound is 255, so idx is always in range.
        &self.buckets[idx.min(self.buckets.len() - 1)].glyph
    }

    /// Glyph of the lowest bucket (used as background).
    pub fn darkest(&self) -> &str {
        &self.buckets[0].glyph
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Display width of the glyphs when they all agree.
    pub fn glyph_width(&self) -> Option<usize> {
        let first = UnicodeWidthStr::width(self.darkest());
        self.buckets
            .iter()
            .all(|b| UnicodeWidthStr::width(b.glyph.as_str()) == first)
            .then_some(first)
    }

    /// Whether every glyph has the same display width.
    pub fn is_uniform_width(&self) -> bool {
        self.glyph_width().is_some()
    }
}
