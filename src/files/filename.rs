//! Filesystem-safe file names for saved animations.

use deunicode::deunicode;

/// Windows reserved device names that cannot be used as filenames.
const WINDOWS_RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Used when sanitization leaves nothing.
const FALLBACK_NAME: &str = "animation";

/// Extension of animation files.
pub const ANIMATION_EXTENSION: &str = "json";

/// Maximum filename length for most filesystems.
const MAX_FILENAME_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilenameError {
    #[error("filename too long: {length} characters (max {max})")]
    TooLong { length: usize, max: usize },
}

/// Sanitizes an animation name for use as a file stem.
///
/// 1. Unicode → ASCII transliteration
/// 2. Whitespace → hyphens, runs of hyphens collapsed
/// 3. Invalid filesystem characters and brackets removed
/// 4. Leading/trailing dots and hyphens trimmed
/// 5. Windows reserved names prefixed with `_`
/// 6. Empty results → `animation`
pub fn sanitize(input: &str) -> String {
    let ascii = deunicode(input);

    let mut result = String::with_capacity(ascii.len());
    let mut last_was_hyphen = false;
    for c in ascii.chars() {
        if c.is_whitespace() || c == '-' {
            if !last_was_hyphen {
                result.push('-');
                last_was_hyphen = true;
            }
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            result.push(c);
            last_was_hyphen = false;
        }
        // Invalid filesystem characters, brackets and other punctuation are dropped
    }

    let trimmed = trim_edges(&result);
    let name = handle_reserved_name(trimmed);
    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

/// `<sanitized name>.json`, truncated to fit filesystem limits.
pub fn animation_filename(name: &str) -> Result<String, FilenameError> {
    let max_stem = MAX_FILENAME_LENGTH - ANIMATION_EXTENSION.len() - 1;
    let stem: String = sanitize(name).chars().take(max_stem).collect();
    let filename = format!("{stem}.{ANIMATION_EXTENSION}");
    validate_length(&filename)?;
    Ok(filename)
}

/// Rejects names over the 255 byte limit.
pub fn validate_length(filename: &str) -> Result<(), FilenameError> {
    if filename.len() > MAX_FILENAME_LENGTH {
        Err(FilenameError::TooLong {
            length: filename.len(),
            max: MAX_FILENAME_LENGTH,
        })
    } else {
        Ok(())
    }
}

fn trim_edges(s: &str) -> &str {
    s.trim_matches(|c| c == '.' || c == ' ' || c == '-')
}

/// Prefixes Windows reserved names (`CON`, `con.txt`, ...) with `_`.
fn handle_reserved_name(name: &str) -> String {
    let base_name = match name.find('.') {
        Some(pos) => &name[..pos],
        None => name,
    };
    let upper = base_name.to_uppercase();
    if WINDOWS_RESERVED.contains(&upper.as_str()) {
        format!("_{name}")
    } else {
        name.to_string()
    }
}
