//! File naming helpers.

pub mod filename;

pub use filename::{animation_filename, sanitize, FilenameError};
