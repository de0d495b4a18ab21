//! File naming of saved animations

use animascii::files::{animation_filename, sanitize};
use animascii::{Animation, Library};

// ============================================================================
// Sanitization
// ============================================================================

#[test]
fn sanitize_replaces_mixed_whitespace() {
    assert_eq!(sanitize("my \t\n anim"), "my-anim");
}

#[test]
fn sanitize_removes_path_separators() {
    assert_eq!(sanitize("path/to\\anim"), "pathtoanim");
}

#[test]
fn sanitize_handles_mixed_unicode_and_ascii() {
    assert_eq!(sanitize("my-projeçt_v2"), "my-project_v2");
}

#[test]
fn sanitize_removes_non_ascii_scripts() {
    let result = sanitize("日本語");
    assert!(!result.contains('日'));
    assert!(!result.is_empty());
}

#[test]
fn sanitize_handles_emoji() {
    let result = sanitize("party🎉time");
    assert!(!result.contains('🎉'));
    assert!(result.starts_with("party"));
    assert!(result.ends_with("time"));
}

#[test]
fn sanitize_trims_mixed_leading_chars() {
    assert_eq!(sanitize(". . .anim"), "anim");
}

#[test]
fn sanitize_handles_reserved_names_case_insensitively() {
    assert_eq!(sanitize("PRN"), "_PRN");
    assert_eq!(sanitize("lpt1"), "_lpt1");
}

// ============================================================================
// Library file names
// ============================================================================

#[test]
fn library_saves_under_sanitized_name() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = Library::open(dir.path()).unwrap();
    let path = library
        .save(&Animation::from_frames("Hello World!", vec!["x".into()]))
        .unwrap();

    assert_eq!(path, dir.path().join(animation_filename("Hello World!").unwrap()));
    assert_eq!(path.file_name().unwrap(), "Hello-World.json");
    // the animation keeps its display name
    assert_eq!(library.names(), vec!["Hello World!"]);
}

#[test]
fn saving_same_name_replaces_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = Library::open(dir.path()).unwrap();
    library.save(&Animation::from_frames("dup", vec!["1".into()])).unwrap();
    library.save(&Animation::from_frames("dup", vec!["1".into(), "2".into()])).unwrap();

    assert_eq!(library.items().len(), 1);
    assert_eq!(library.items()[0].frame_count, 2);
}
