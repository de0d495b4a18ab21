//! Video and GIF frames to ASCII animations.
//!
//! Animated GIFs are decoded in-process. Every other container goes through
//! the system `ffmpeg`/`ffprobe` binaries: frames are streamed as raw RGBA
//! over a pipe, so no native FFmpeg libraries are needed at build time.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, RgbaImage};
use rayon::prelude::*;

use super::image::{render_rgba, RenderOptions};
use super::RenderError;
use crate::animation::Animation;

/// Frame selection for video conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoOptions {
    /// Read at most this many frames from the source (`None` reads all).
    pub max_frames: Option<usize>,
    /// Keep every n-th frame of those read.
    pub speed_up: usize,
}

impl Default for VideoOptions {
    fn default() -> Self {
        Self {
            max_frames: None,
            speed_up: 1,
        }
    }
}

/// Decoded source frames plus timing information.
#[derive(Debug)]
pub struct DecodedFrames {
    pub frames: Vec<RgbaImage>,
    /// Source delay between consecutive frames, when known.
    pub frame_delay_ms: Option<u64>,
}

/// Convert a GIF or video file into an animation.
pub fn render_video(
    path: &Path,
    name: &str,
    render: &RenderOptions,
    opts: &VideoOptions,
) -> Result<Animation, RenderError> {
    if opts.speed_up == 0 {
        return Err(RenderError::video("speed-up factor must be at least 1"));
    }

    let decoded = decode_frames(path, opts.max_frames)?;
    let source_count = decoded.frames.len();
    let frames = select_frames(decoded.frames, opts);
    tracing::debug!(
        source_frames = source_count,
        kept = frames.len(),
        "rendering video frames"
    );

    let data = frames
        .par_iter()
        .map(|frame| render_rgba(frame, render))
        .collect::<Result<Vec<_>, _>>()?;

    let mut animation = Animation::from_frames(name, data);
    animation.frame_delay_ms = decoded
        .frame_delay_ms
        .map(|ms| ms * opts.speed_up as u64);
    Ok(animation)
}

/// Apply `max_frames` then keep every `speed_up`-th frame.
pub fn select_frames<T>(frames: Vec<T>, opts: &VideoOptions) -> Vec<T> {
    let step = opts.speed_up.max(1);
    let limit = opts.max_frames.unwrap_or(usize::MAX);
    frames.into_iter().take(limit).step_by(step).collect()
}

/// Decode up to `max_frames` frames from a GIF or video.
pub fn decode_frames(path: &Path, max_frames: Option<usize>) -> Result<DecodedFrames, RenderError> {
    let is_gif = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"));

    if is_gif {
        decode_gif(path, max_frames)
    } else {
        let info = probe_video(path)?;
        let frames = decode_ffmpeg(OsStr::new("ffmpeg"), path, &info, max_frames)?;
        Ok(DecodedFrames {
            frames,
            frame_delay_ms: info.fps.map(|fps| (1000.0 / fps).round() as u64),
        })
    }
}

fn decode_gif(path: &Path, max_frames: Option<usize>) -> Result<DecodedFrames, RenderError> {
    let file = File::open(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoder = GifDecoder::new(BufReader::new(file))?;

    let mut frames = Vec::new();
    let mut total_delay_ms = 0u64;
    for frame in decoder.into_frames().take(max_frames.unwrap_or(usize::MAX)) {
        let frame = frame?;
        let (numer, denom) = frame.delay().numer_denom_ms();
        total_delay_ms += u64::from(numer) / u64::from(denom.max(1));
        frames.push(frame.into_buffer());
    }

    let frame_delay_ms = match frames.len() {
        0 => None,
        n if total_delay_ms == 0 => {
            tracing::debug!(frames = n, "gif has no frame delays");
            None
        }
        n => Some(total_delay_ms / n as u64),
    };

    Ok(DecodedFrames {
        frames,
        frame_delay_ms,
    })
}

/// Basic metadata about a source video.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    pub fps: Option<f64>,
}

/// Probe the first video stream with `ffprobe`.
pub fn probe_video(path: &Path) -> Result<VideoInfo, RenderError> {
    probe_video_with(OsStr::new("ffprobe"), path)
}

fn probe_video_with(ffprobe: &OsStr, path: &Path) -> Result<VideoInfo, RenderError> {
    let out = Command::new(ffprobe)
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(path)
        .output()
        .map_err(|e| RenderError::video(format!("failed to run ffprobe (is ffmpeg installed?): {e}")))?;
    if !out.status.success() {
        return Err(RenderError::video(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    parse_probe_output(&out.stdout)
}

fn parse_probe_output(json: &[u8]) -> Result<VideoInfo, RenderError> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
    }

    let parsed: ProbeOut = serde_json::from_slice(json)
        .map_err(|e| RenderError::video(format!("ffprobe json parse failed: {e}")))?;
    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| RenderError::video("no video stream found"))?;

    let (Some(width), Some(height)) = (stream.width, stream.height) else {
        return Err(RenderError::video("ffprobe reported no frame size"));
    };

    Ok(VideoInfo {
        width,
        height,
        fps: stream.r_frame_rate.as_deref().and_then(parse_rate),
    })
}

/// Parse an ffprobe rate such as `30000/1001` or `25`.
fn parse_rate(rate: &str) -> Option<f64> {
    let value = match rate.split_once('/') {
        Some((n, d)) => {
            let d: f64 = d.parse().ok()?;
            if d == 0.0 {
                return None;
            }
            n.parse::<f64>().ok()? / d
        }
        None => rate.parse().ok()?,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Stream raw RGBA frames out of `ffmpeg`.
///
/// A partial trailing frame or a failing exit status is an error, except
/// when ffmpeg is stopped here after `max_frames` frames.
fn decode_ffmpeg(
    ffmpeg: &OsStr,
    path: &Path,
    info: &VideoInfo,
    max_frames: Option<usize>,
) -> Result<Vec<RgbaImage>, RenderError> {
    let frame_len = info.width as usize * info.height as usize * 4;
    if frame_len == 0 {
        return Err(RenderError::video("video has zero frame size"));
    }

    let mut cmd = Command::new(ffmpeg);
    cmd.args(["-v", "error", "-i"]).arg(path);
    if let Some(max) = max_frames {
        cmd.args(["-frames:v", &max.to_string()]);
    }
    cmd.args(["-f", "rawvideo", "-pix_fmt", "rgba", "pipe:1"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd
        .spawn()
        .map_err(|e| RenderError::video(format!("failed to spawn ffmpeg (is it on PATH?): {e}")))?;
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| RenderError::video("failed to open ffmpeg stdout"))?;

    let limit = max_frames.unwrap_or(usize::MAX);
    let mut frames = Vec::new();
    let mut buf = vec![0u8; frame_len];
    while frames.len() < limit {
        match fill_frame(&mut stdout, &mut buf) {
            Ok(0) => break,
            Ok(n) if n < frame_len => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(RenderError::video(format!(
                    "truncated frame {} in '{}': got {n} of {frame_len} bytes",
                    frames.len() + 1,
                    path.display()
                )));
            }
            Ok(_) => {}
            Err(e) => return Err(RenderError::video(format!("reading ffmpeg output: {e}"))),
        }
        let image = RgbaImage::from_raw(info.width, info.height, buf.clone())
            .ok_or_else(|| RenderError::video("frame buffer size mismatch"))?;
        frames.push(image);
    }
    drop(stdout);

    // ffmpeg may still be writing once we have enough frames
    let stopped_early = frames.len() >= limit;
    if stopped_early {
        let _ = child.kill();
    }
    let output = child
        .wait_with_output()
        .map_err(|e| RenderError::video(format!("failed to wait for ffmpeg: {e}")))?;

    if !output.status.success() && !stopped_early {
        return Err(RenderError::video(format!(
            "ffmpeg failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(frames)
}

/// Read until `buf` is full or the stream ends. Returns bytes read.
fn fill_frame(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifEncoder;
    use image::{Delay, Frame, Rgba};

    #[test]
    fn select_frames_limits_then_steps() {
        let frames: Vec<u32> = (0..10).collect();
        let opts = VideoOptions {
            max_frames: Some(7),
            speed_up: 3,
        };
        assert_eq!(select_frames(frames, &opts), vec![0, 3, 6]);
    }

    #[test]
    fn select_frames_defaults_keep_everything() {
        let frames: Vec<u32> = (0..4).collect();
        assert_eq!(select_frames(frames, &VideoOptions::default()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn parse_rate_handles_fractions() {
        assert_eq!(parse_rate("25"), Some(25.0));
        assert!((parse_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert_eq!(parse_rate("0/0"), None);
        assert_eq!(parse_rate("garbage"), None);
    }

    #[test]
    fn probe_output_picks_video_stream() {
        let json = br#"{"streams":[
            {"codec_type":"audio"},
            {"codec_type":"video","width":640,"height":480,"r_frame_rate":"25/1"}
        ]}"#;
        let info = parse_probe_output(json).unwrap();
        assert_eq!(
            info,
            VideoInfo {
                width: 640,
                height: 480,
                fps: Some(25.0)
            }
        );
    }

    #[test]
    fn probe_output_without_video_is_an_error() {
        let json = br#"{"streams":[{"codec_type":"audio"}]}"#;
        assert!(parse_probe_output(json).is_err());
    }

    #[test]
    fn fill_frame_reports_short_reads() {
        let mut src: &[u8] = &[1, 2, 3];
        let mut buf = [0u8; 4];
        assert_eq!(fill_frame(&mut src, &mut buf).unwrap(), 3);
        assert_eq!(fill_frame(&mut src, &mut buf).unwrap(), 0);
    }

    fn write_gif(path: &Path, shades: &[u8]) {
        let file = File::create(path).unwrap();
        let mut encoder = GifEncoder::new(file);
        for &v in shades {
            let buf = RgbaImage::from_pixel(4, 2, Rgba([v, v, v, 255]));
            let frame = Frame::from_parts(buf, 0, 0, Delay::from_numer_denom_ms(50, 1));
            encoder.encode_frame(frame).unwrap();
        }
    }

    #[test]
    fn gif_frames_become_animation_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fade.gif");
        write_gif(&path, &[0, 255, 0, 255]);

        let render = RenderOptions {
            width: 4,
            height: Some(2),
            keep_aspect: false,
            ..RenderOptions::default()
        };
        let opts = VideoOptions {
            max_frames: None,
            speed_up: 2,
        };
        let anim = render_video(&path, "fade", &render, &opts).unwrap();

        assert_eq!(anim.name, "fade");
        assert_eq!(anim.data, vec!["    \n    ".to_string(), "    \n    ".to_string()]);
        assert_eq!(anim.frame_delay_ms, Some(100));
    }

    /// Executable shell script standing in for ffmpeg or ffprobe.
    #[cfg(unix)]
    fn fake_tool(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    fn two_by_one() -> VideoInfo {
        VideoInfo {
            width: 2,
            height: 1,
            fps: Some(25.0),
        }
    }

    #[cfg(unix)]
    #[test]
    fn probe_reads_stream_from_tool() {
        let dir = tempfile::tempdir().unwrap();
        let ffprobe = fake_tool(
            dir.path(),
            "ffprobe",
            r#"echo '{"streams":[{"codec_type":"video","width":2,"height":1,"r_frame_rate":"25/1"}]}'"#,
        );
        let info = probe_video_with(ffprobe.as_os_str(), Path::new("clip.mp4")).unwrap();
        assert_eq!(info, two_by_one());
    }

    #[cfg(unix)]
    #[test]
    fn ffmpeg_frames_are_split_by_frame_size() {
        let dir = tempfile::tempdir().unwrap();
        let ffmpeg = fake_tool(dir.path(), "ffmpeg", "printf 'AAAAAAAABBBBBBBB'");
        let frames = decode_ffmpeg(ffmpeg.as_os_str(), Path::new("clip.mp4"), &two_by_one(), None).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].get_pixel(0, 0).0, [b'B'; 4]);
    }

    #[cfg(unix)]
    #[test]
    fn truncated_ffmpeg_frame_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let ffmpeg = fake_tool(dir.path(), "ffmpeg", "printf 'AAAAAAAABBB'\nexit 1");
        let err = decode_ffmpeg(ffmpeg.as_os_str(), Path::new("clip.mp4"), &two_by_one(), None).unwrap_err();
        assert!(matches!(err, RenderError::Video(_)));
        assert!(err.to_string().contains("got 3 of 8 bytes"), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn failing_ffmpeg_is_an_error_after_full_frames() {
        let dir = tempfile::tempdir().unwrap();
        let ffmpeg = fake_tool(dir.path(), "ffmpeg", "printf 'AAAAAAAA'\necho 'corrupt packet' >&2\nexit 1");
        let err = decode_ffmpeg(ffmpeg.as_os_str(), Path::new("clip.mp4"), &two_by_one(), None).unwrap_err();
        assert!(matches!(err, RenderError::Video(_)));
        assert!(err.to_string().contains("corrupt packet"), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn stopping_at_max_frames_is_not_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let ffmpeg = fake_tool(dir.path(), "ffmpeg", "printf 'AAAAAAAABBBBBBBB'\nexec sleep 5");
        let frames = decode_ffmpeg(ffmpeg.as_os_str(), Path::new("clip.mp4"), &two_by_one(), Some(1)).unwrap();
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn zero_speed_up_is_rejected() {
        let opts = VideoOptions {
            max_frames: None,
            speed_up: 0,
        };
        let err = render_video(
            Path::new("missing.gif"),
            "x",
            &RenderOptions::default(),
            &opts,
        )
        .unwrap_err();
        assert!(err.to_string().contains("speed-up"));
    }
}
