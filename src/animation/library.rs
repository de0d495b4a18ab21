use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use super::Animation;
use crate::files::animation_filename;

/// Summary of one animation file in the library.
#[derive(Debug, Clone)]
pub struct LibraryItem {
    pub path: PathBuf,
    pub name: String,
    pub frame_count: usize,
    pub width: usize,
    pub height: usize,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Local>>,
}

impl LibraryItem {
    fn from_file(path: &Path) -> Result<Self> {
        let animation = Animation::load(path)?;
        let meta = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for {}", path.display()))?;
        let (width, height) = animation.dimensions();
        Ok(Self {
            path: path.to_path_buf(),
            name: animation.name,
            frame_count: animation.data.len(),
            width,
            height,
            size_bytes: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Local>::from),
        })
    }

    pub fn file_stem(&self) -> &str {
        self.path.file_stem().and_then(|s| s.to_str()).unwrap_or("")
    }

    pub fn size_human(&self) -> String {
        humansize::format_size(self.size_bytes, humansize::BINARY)
    }

    pub fn modified_display(&self) -> String {
        self.modified
            .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn load(&self) -> Result<Animation> {
        Ok(Animation::load(&self.path)?)
    }
}

/// A directory of animation JSON files.
#[derive(Debug, Clone)]
pub struct Library {
    dir: PathBuf,
    items: Vec<LibraryItem>,
}

impl Library {
    /// Scan `dir` for animations. A missing directory is an empty library.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let mut library = Self {
            dir: dir.into(),
            items: Vec::new(),
        };
        library.refresh()?;
        Ok(library)
    }

    /// Re-scan the directory.
    pub fn refresh(&mut self) -> Result<()> {
        self.items.clear();
        if !self.dir.exists() {
            tracing::debug!(dir = %self.dir.display(), "library directory does not exist yet");
            return Ok(());
        }

        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read library directory {}", self.dir.display()))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match LibraryItem::from_file(&path) {
                Ok(item) => self.items.push(item),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping invalid animation"),
            }
        }
        self.items.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.path.cmp(&b.path))
        });
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn items(&self) -> &[LibraryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.name.as_str()).collect()
    }

    /// Look up by animation name, then by file stem.
    pub fn find(&self, name_or_stem: &str) -> Option<&LibraryItem> {
        self.items
            .iter()
            .find(|i| i.name == name_or_stem)
            .or_else(|| self.items.iter().find(|i| i.file_stem() == name_or_stem))
    }

    /// Path an animation with this name is saved to.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        Ok(self.dir.join(animation_filename(name)?))
    }

    /// Name of the animation another name's file would overwrite, if they differ.
    fn replaced_name(&self, path: &Path, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|i| i.path == path && i.name != name)
            .map(|i| i.name.as_str())
    }

    /// Save into the library, replacing a file of the same name.
    pub fn save(&mut self, animation: &Animation) -> Result<PathBuf> {
        let path = self.path_for(&animation.name)?;
        if let Some(existing) = self.replaced_name(&path, &animation.name) {
            tracing::warn!(
                existing,
                name = %animation.name,
                path = %path.display(),
                "replacing animation with a different name"
            );
        }
        animation.save(&path)?;
        self.refresh()?;
        Ok(path)
    }

    pub fn remove(&mut self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("Failed to delete {}", path.display()))?;
        tracing::info!(path = %path.display(), "deleted animation");
        self.items.retain(|i| i.path != path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, file: &str, json: &str) {
        fs::write(dir.join(file), json).unwrap();
    }

    fn library_with_files() -> (TempDir, Library) {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.json", r#"{"name":"beta","data":["ab\ncd","x"]}"#);
        write(dir.path(), "a.json", r#"{"name":"Alpha","data":["abc"]}"#);
        write(dir.path(), "broken.json", "{");
        write(dir.path(), "notes.txt", "ignored");
        let lib = Library::open(dir.path()).unwrap();
        (dir, lib)
    }

    #[test]
    fn open_skips_invalid_files_and_sorts() {
        let (_dir, lib) = library_with_files();
        assert_eq!(lib.names(), vec!["Alpha", "beta"]);
    }

    #[test]
    fn items_carry_dimensions() {
        let (_dir, lib) = library_with_files();
        let beta = lib.find("beta").unwrap();
        assert_eq!(beta.frame_count, 2);
        assert_eq!((beta.width, beta.height), (2, 2));
        assert!(beta.size_bytes > 0);
        assert!(beta.modified.is_some());
    }

    #[test]
    fn find_falls_back_to_file_stem() {
        let (_dir, lib) = library_with_files();
        assert_eq!(lib.find("b").unwrap().name, "beta");
        assert!(lib.find("missing").is_none());
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let lib = Library::open(dir.path().join("nope")).unwrap();
        assert!(lib.is_empty());
    }

    #[test]
    fn save_uses_sanitized_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut lib = Library::open(dir.path().join("lib")).unwrap();
        let anim = Animation::from_frames("My Spinner", vec!["|".into()]);

        let path = lib.save(&anim).unwrap();
        assert_eq!(path.file_name().unwrap(), "My-Spinner.json");
        assert_eq!(lib.names(), vec!["My Spinner"]);
        assert_eq!(lib.find("My-Spinner").unwrap().load().unwrap(), anim);
    }

    #[test]
    fn names_sharing_a_file_replace_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let mut lib = Library::open(dir.path()).unwrap();
        let first = lib.save(&Animation::from_frames("a b", vec!["x".into()])).unwrap();
        let second_path = lib.path_for("a-b").unwrap();

        assert_eq!(first, second_path);
        assert_eq!(lib.replaced_name(&second_path, "a-b"), Some("a b"));
        assert_eq!(lib.replaced_name(&second_path, "a b"), None);

        lib.save(&Animation::from_frames("a-b", vec!["y".into()])).unwrap();
        assert_eq!(lib.names(), vec!["a-b"]);
    }

    #[test]
    fn remove_deletes_file_and_item() {
        let (_dir, mut lib) = library_with_files();
        let path = lib.find("Alpha").unwrap().path.clone();
        lib.remove(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(lib.names(), vec!["beta"]);
    }

    #[test]
    fn size_is_human_readable() {
        let item = LibraryItem {
            path: PathBuf::from("x.json"),
            name: "x".into(),
            frame_count: 0,
            width: 0,
            height: 0,
            size_bytes: 2048,
            modified: None,
        };
        assert_eq!(item.size_human(), "2 KiB");
        assert_eq!(item.modified_display(), "-");
    }
}
