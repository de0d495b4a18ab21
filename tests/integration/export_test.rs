//! Export to asciicast v3

use animascii::asciicast::AsciicastFile;

use crate::helpers::TestEnv;

#[test]
fn export_loops_with_markers() {
    let env = TestEnv::new().with_library_fixtures(&["spinner.json"]);
    let out = env.path().join("spinner.cast");

    let (stdout, _stderr, exit_code) = env.run(&[
        "export",
        "spinner",
        "--out",
        out.to_str().unwrap(),
        "--loops",
        "2",
        "--delay",
        "100",
        "--title",
        "Spin",
    ]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Exported 8 frames"));

    let content = std::fs::read_to_string(&out).unwrap();
    let cast = AsciicastFile::parse_str(&content).unwrap();
    assert_eq!(cast.header.version, 3);
    assert_eq!(cast.header.title.as_deref(), Some("Spin"));
    assert_eq!((cast.header.term.cols, cast.header.term.rows), (1, 1));

    let labels: Vec<&str> = cast.markers().iter().map(|e| e.data.as_str()).collect();
    assert_eq!(labels, vec!["spinner", "spinner #2"]);
    assert_eq!(cast.outputs().len(), 8);
    assert!((cast.duration() - 0.7).abs() < 1e-6);
}

#[test]
fn export_uses_recorded_delay() {
    let env = TestEnv::new().with_library_fixtures(&["wave.json"]);
    let out = env.path().join("wave.cast");

    let (_stdout, _stderr, exit_code) = env.run(&["export", "wave", "--out", out.to_str().unwrap()]);
    assert_eq!(exit_code, 0);

    let cast = AsciicastFile::parse_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    // three frames 50 ms apart
    assert!((cast.duration() - 0.1).abs() < 1e-6);
    assert!(cast.outputs()[0].data.ends_with("~  "));
}

#[test]
fn export_missing_animation_fails() {
    let env = TestEnv::new();
    let out = env.path().join("none.cast");
    let (_stdout, stderr, exit_code) = env.run(&["export", "ghost", "--out", out.to_str().unwrap()]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Animation not found: ghost"));
    assert!(!out.exists());
}
