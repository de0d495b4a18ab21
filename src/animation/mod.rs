//! Animation envelope and on-disk library.
//!
//! An animation is stored as a small JSON document:
//!
//! ```json
//! {"name": "Loading", "data": ["frame 1", "frame 2"]}
//! ```
//!
//! Frames are plain text with `\n` line separators. An optional
//! `frame_delay_ms` key records the source timing of converted videos.

mod library;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::frame;

pub use library::{Library, LibraryItem};

#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid animation file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode animation: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A named sequence of text frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    pub name: String,
    pub data: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_delay_ms: Option<u64>,
}

impl Animation {
    pub fn from_frames(name: impl Into<String>, frames: Vec<String>) -> Self {
        Self {
            name: name.into(),
            data: frames,
            frame_delay_ms: None,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Largest frame width and height.
    pub fn dimensions(&self) -> (usize, usize) {
        frame::max_dimensions(&self.data)
    }

    pub fn parse_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, AnimationError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, AnimationError> {
        let content = fs::read_to_string(path).map_err(|source| AnimationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content).map_err(|source| AnimationError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the JSON envelope, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), AnimationError> {
        let write_err = |source| AnimationError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, self.to_json()?).map_err(write_err)?;
        tracing::info!(path = %path.display(), frames = self.data.len(), "saved animation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_envelope_has_name_and_data() {
        let anim = Animation::from_frames("spin", vec!["|".into(), "/".into()]);
        assert_eq!(anim.to_json().unwrap(), r#"{"name":"spin","data":["|","/"]}"#);
    }

    #[test]
    fn frame_delay_is_written_when_present() {
        let mut anim = Animation::from_frames("spin", vec!["|".into()]);
        anim.frame_delay_ms = Some(40);
        let json = anim.to_json().unwrap();
        assert!(json.contains(r#""frame_delay_ms":40"#));
        assert_eq!(Animation::parse_str(&json).unwrap(), anim);
    }

    #[test]
    fn parses_files_without_delay() {
        let anim = Animation::parse_str(r#"{"name":"a","data":["x\ny"]}"#).unwrap();
        assert_eq!(anim.frame_delay_ms, None);
        assert_eq!(anim.dimensions(), (1, 2));
    }

    #[test]
    fn missing_keys_are_rejected() {
        assert!(Animation::parse_str(r#"{"name":"a"}"#).is_err());
        assert!(Animation::parse_str(r#"{"data":[]}"#).is_err());
    }

    #[test]
    fn load_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = Animation::load(&path).unwrap_err();
        assert!(matches!(err, AnimationError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/a.json");
        let anim = Animation::from_frames("a", vec!["x".into()]);

        anim.save(&path).unwrap();
        assert_eq!(Animation::load(&path).unwrap(), anim);
    }
}
