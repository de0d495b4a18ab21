//! `generate` end to end: stdout JSON, saving and playing back

use animascii::Animation;

use crate::helpers::TestEnv;

#[test]
fn generate_prints_json_by_default() {
    let (stdout, _stderr, exit_code) = TestEnv::new().run(&["generate", "abc"]);
    assert_eq!(exit_code, 0);

    let anim = Animation::parse_str(stdout.trim()).unwrap();
    assert_eq!(anim.name, "abc");
    assert_eq!(anim.data, vec!["a  ", "ab "]);
}

#[test]
fn generate_with_frame_padding() {
    let (stdout, _stderr, exit_code) = TestEnv::new().run(&["generate", "hey", "--pad", "frame"]);
    assert_eq!(exit_code, 0);

    let anim = Animation::parse_str(stdout.trim()).unwrap();
    insta::assert_snapshot!("frame_padding_frames", anim.data.join("\n~~~\n"));
}

#[test]
fn generate_with_simple_padding_and_name() {
    let (stdout, _stderr, exit_code) = TestEnv::new().run(&[
        "generate", "ab", "--pad", "simple", "--pad-str", "*", "--pad-y", "0", "--name", "stars",
    ]);
    assert_eq!(exit_code, 0);

    let anim = Animation::parse_str(stdout.trim()).unwrap();
    assert_eq!(anim.name, "stars");
    assert_eq!(anim.data, vec!["*a *"]);
}

#[test]
fn generate_single_character_fails() {
    let (stdout, stderr, exit_code) = TestEnv::new().run(&["generate", "a"]);
    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Nothing to animate"));
}

#[test]
fn generate_to_out_file() {
    let env = TestEnv::new();
    let out = env.path().join("anims").join("hi.json");
    let (stdout, _stderr, exit_code) = env.run(&["generate", "hi!", "--out", out.to_str().unwrap()]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Wrote 2 frames to"));
    let anim = Animation::load(&out).unwrap();
    assert_eq!(anim.frame_count(), 2);
}

#[test]
fn saved_animation_is_listed_and_playable() {
    let env = TestEnv::new();

    let (stdout, _stderr, exit_code) = env.run(&["generate", "hey", "--save"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Saved 'hey'"));
    assert!(env.library().join("hey.json").is_file());

    let (stdout, _stderr, exit_code) = env.run(&["list"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.lines().any(|l| l.starts_with("hey ")));
    assert!(stdout.contains("1 animations in"));

    let (stdout, _stderr, exit_code) = env.run(&["play", "hey", "--plain", "--delay", "1"]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "h  \n\nhe \n");
}
