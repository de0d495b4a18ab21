//! Library listing and plain playback

use crate::helpers::{fixture, TestEnv};

#[test]
fn empty_library_says_so() {
    let (stdout, _stderr, exit_code) = TestEnv::new().run(&["list"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("No animations in"));
}

#[test]
fn list_shows_valid_animations_and_skips_broken() {
    let env = TestEnv::new().with_library_fixtures(&["spinner.json", "wave.json", "broken.json"]);
    let (stdout, _stderr, exit_code) = env.run(&["list"]);
    assert_eq!(exit_code, 0);

    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("NAME"));
    assert!(lines[0].contains("FRAMES"));
    assert!(lines[1].starts_with("spinner"));
    assert!(lines[2].starts_with("wave"));
    assert!(!stdout.contains("broken"));
    assert!(stdout.contains("2 animations in"));
}

#[test]
fn play_library_name_plain() {
    let env = TestEnv::new().with_library_fixtures(&["spinner.json"]);
    let (stdout, _stderr, exit_code) = env.run(&["play", "spinner", "--plain", "--delay", "1"]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "|\n\n/\n\n-\n\n\\\n");
}

#[test]
fn play_file_path_with_loops() {
    let env = TestEnv::new();
    let path = fixture("wave.json");
    let (stdout, _stderr, exit_code) = env.run(&[
        "play",
        path.to_str().unwrap(),
        "--plain",
        "--loops",
        "2",
        "--delay",
        "1",
    ]);
    assert_eq!(exit_code, 0);
    let ticks: Vec<&str> = stdout.trim_end().split("\n\n").collect();
    assert_eq!(ticks, vec!["~  ", " ~ ", "  ~", "~  ", " ~ ", "  ~"]);
}

#[test]
fn play_two_animations_side_by_side() {
    let env = TestEnv::new().with_library_fixtures(&["spinner.json", "wave.json"]);
    let (stdout, _stderr, exit_code) = env.run(&["play", "wave", "spinner", "--plain", "--delay", "1"]);
    assert_eq!(exit_code, 0);

    let ticks: Vec<&str> = stdout.trim_end().split("\n\n").collect();
    // the shorter wave holds its last frame while the spinner finishes
    assert_eq!(ticks.len(), 4);
    assert_eq!(ticks[0], "~  \n|");
    assert_eq!(ticks[3], "  ~\n\\");
}

#[test]
fn infinite_loops_play_once_when_plain() {
    let env = TestEnv::new().with_library_fixtures(&["spinner.json"]);
    let (stdout, stderr, exit_code) =
        env.run(&["play", "spinner", "--plain", "--loops", "-1", "--delay", "1"]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim_end().split("\n\n").count(), 4);
    assert!(stderr.contains("infinite loops are played once"), "{stderr}");
}

#[test]
fn broken_file_path_reports_parse_error() {
    let env = TestEnv::new();
    let path = fixture("broken.json");
    let (_stdout, stderr, exit_code) = env.run(&["play", path.to_str().unwrap(), "--plain"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("invalid animation file"));
}

#[test]
fn gallery_requires_terminal() {
    let env = TestEnv::new().with_library_fixtures(&["spinner.json"]);
    let (_stdout, stderr, exit_code) = env.run(&["gallery"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("terminal"));
}
