//! Command line behavior: help, exit codes, config and completions

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::helpers::TestEnv;

// ============================================================================
// Help and usage errors
// ============================================================================

#[test]
fn help_lists_commands() {
    let env = TestEnv::new();
    let (stdout, _stderr, exit_code) = env.run(&["--help"]);

    assert_eq!(exit_code, 0);
    for cmd in ["image", "video", "text", "generate", "play", "list", "gallery", "export", "config"] {
        assert!(stdout.contains(cmd), "help is missing {cmd}");
    }
}

#[test]
fn version_flag_prints_version() {
    TestEnv::new()
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_command_is_usage_error() {
    let (_stdout, stderr, exit_code) = TestEnv::new().run(&["dance"]);
    assert_eq!(exit_code, 2);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn play_without_animations_is_usage_error() {
    let (_stdout, stderr, exit_code) = TestEnv::new().run(&["play"]);
    assert_eq!(exit_code, 2);
    assert!(stderr.contains("required"));
    assert!(stderr.contains("<ANIM>"));
}

#[test]
fn invalid_loop_count_is_usage_error() {
    let (_stdout, stderr, exit_code) = TestEnv::new().run(&["play", "x", "--loops", "-3"]);
    assert_eq!(exit_code, 2);
    assert!(stderr.contains("invalid loop count"));
}

// ============================================================================
// Runtime errors
// ============================================================================

#[test]
fn missing_animation_exits_1() {
    let (_stdout, stderr, exit_code) = TestEnv::new().run(&["play", "ghost", "--plain"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Animation not found: ghost"));
}

#[test]
fn missing_image_exits_1() {
    let (_stdout, stderr, exit_code) = TestEnv::new().run(&["image", "/no/such/picture.png"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("File not found"));
    assert!(stderr.contains("picture.png"));
}

#[test]
fn invalid_config_is_reported() {
    let env = TestEnv::new();
    env.write_config("[player]\ndelay_ms = \"fast\"\n");
    let (_stdout, stderr, exit_code) = env.run(&["list"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Invalid config"));
}

// ============================================================================
// Config subcommands
// ============================================================================

#[test]
fn config_path_honors_env() {
    let env = TestEnv::new();
    let (stdout, _stderr, exit_code) = env.run(&["config", "path"]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), env.config_path().display().to_string());
}

#[test]
fn config_show_merges_defaults() {
    let env = TestEnv::new();
    env.write_config("[player]\ndelay_ms = 42\n");
    let (stdout, _stderr, exit_code) = env.run(&["config", "show"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("delay_ms = 42"));
    assert!(stdout.contains("loops = 1"));
    assert!(stdout.contains("charset = \"standard\""));
}

#[test]
fn config_migrate_yes_fills_missing_fields() {
    let env = TestEnv::new();
    env.write_config("# keep me\n[player]\ndelay_ms = 42\n");

    let (stdout, _stderr, exit_code) = env.run(&["config", "migrate", "--yes"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("+ loops = 1"));
    assert!(stdout.contains("Config updated successfully."));

    let content = std::fs::read_to_string(env.config_path()).unwrap();
    assert!(content.starts_with("# keep me\n[player]\ndelay_ms = 42\n"));
    assert!(content.contains("[render]"));

    let (stdout, _stderr, _) = env.run(&["config", "migrate", "--yes"]);
    assert!(stdout.contains("Config is already up to date."));
}

#[test]
fn config_migrate_without_tty_makes_no_changes() {
    let env = TestEnv::new();
    let (stdout, _stderr, exit_code) = env.run(&["config", "migrate"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("No changes made."));
    assert!(!env.config_path().exists());
}

// ============================================================================
// Completions and fonts
// ============================================================================

#[test]
fn completions_for_bash() {
    TestEnv::new()
        .command()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("animascii"));
}

#[test]
fn fonts_lists_builtin_as_default() {
    let (stdout, _stderr, exit_code) = TestEnv::new().run(&["fonts"]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), "standard (default)");
}

#[test]
fn fonts_include_configured_directory() {
    let env = TestEnv::new();
    let fonts = env.path().join("fonts");
    std::fs::create_dir_all(&fonts).unwrap();
    std::fs::write(fonts.join("tiny.flf"), "").unwrap();
    env.write_config(&format!("[text]\nfonts_dir = {:?}\n", fonts.display().to_string()));

    let (stdout, _stderr, exit_code) = env.run(&["fonts"]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["standard (default)", "tiny"]);
}

#[test]
fn text_prints_figlet_art() {
    let (stdout, _stderr, exit_code) = TestEnv::new().run(&["text", "Hi"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.lines().count() > 2);
}

#[test]
fn text_with_missing_font_fails() {
    let (_stdout, stderr, exit_code) = TestEnv::new().run(&["text", "Hi", "--font", "nope"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to load font 'nope'"));
}
