//! Image and GIF conversion through the binary

use animascii::Animation;
use image::codecs::gif::GifEncoder;
use image::{Delay, Frame, Rgba, RgbaImage};

use crate::helpers::TestEnv;

#[test]
fn white_image_renders_densest_glyph() {
    let env = TestEnv::new();
    let path = env.path().join("white.png");
    RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]))
        .save(&path)
        .unwrap();

    let (stdout, _stderr, exit_code) = env.run(&["image", path.to_str().unwrap(), "--width", "10"]);
    assert_eq!(exit_code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(!lines.is_empty());
    assert!(lines.iter().all(|l| *l == "@".repeat(10)));
}

#[test]
fn inverted_black_image_renders_densest_glyph() {
    let env = TestEnv::new();
    let path = env.path().join("black.png");
    RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255])).save(&path).unwrap();

    let (stdout, _stderr, exit_code) = env.run(&[
        "image",
        path.to_str().unwrap(),
        "--width",
        "4",
        "--height",
        "2",
        "--keep-aspect",
        "false",
        "--invert",
    ]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "@@@@\n@@@@\n");
}

#[test]
fn image_out_writes_file() {
    let env = TestEnv::new();
    let path = env.path().join("white.png");
    let out = env.path().join("white.txt");
    RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255])).save(&path).unwrap();

    let (stdout, _stderr, exit_code) = env.run(&[
        "image",
        path.to_str().unwrap(),
        "--width",
        "3",
        "--height",
        "1",
        "--keep-aspect",
        "false",
        "--out",
        out.to_str().unwrap(),
    ]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Wrote"));
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "@@@\n");
}

#[test]
fn gif_converts_to_animation() {
    let env = TestEnv::new();
    let gif = env.path().join("blink.gif");
    {
        let file = std::fs::File::create(&gif).unwrap();
        let mut encoder = GifEncoder::new(file);
        let frames = [0u8, 255, 0].map(|v| {
            Frame::from_parts(
                RgbaImage::from_pixel(8, 8, Rgba([v, v, v, 255])),
                0,
                0,
                Delay::from_numer_denom_ms(80, 1),
            )
        });
        encoder.encode_frames(frames).unwrap();
    }
    let out = env.path().join("blink.json");

    let (_stdout, _stderr, exit_code) = env.run(&[
        "video",
        gif.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--width",
        "2",
        "--height",
        "1",
        "--keep-aspect",
        "false",
    ]);
    assert_eq!(exit_code, 0);

    let anim = Animation::load(&out).unwrap();
    assert_eq!(anim.name, "blink");
    assert_eq!(anim.data, vec!["  ", "@@", "  "]);
    assert_eq!(anim.frame_delay_ms, Some(80));
}

#[test]
fn gif_speed_up_keeps_every_nth_frame() {
    let env = TestEnv::new();
    let gif = env.path().join("steps.gif");
    {
        let file = std::fs::File::create(&gif).unwrap();
        let mut encoder = GifEncoder::new(file);
        let frames = (0..4).map(|_| {
            Frame::from_parts(
                RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])),
                0,
                0,
                Delay::from_numer_denom_ms(50, 1),
            )
        });
        encoder.encode_frames(frames).unwrap();
    }

    let (stdout, _stderr, exit_code) = env.run(&[
        "video",
        gif.to_str().unwrap(),
        "--speed-up",
        "2",
        "--width",
        "1",
        "--height",
        "1",
        "--keep-aspect",
        "false",
    ]);
    assert_eq!(exit_code, 0);
    let anim = Animation::parse_str(stdout.trim()).unwrap();
    assert_eq!(anim.frame_count(), 2);
    assert_eq!(anim.frame_delay_ms, Some(100));
}
