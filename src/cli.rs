//! Command line definition
//!
//! Lives in the library so `xtask` can generate man pages from it.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::player::LoopCount;
use crate::render::RenderMode;

#[cfg(not(feature = "release"))]
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("ANIMASCII_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("ANIMASCII_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "animascii",
    version,
    long_version = LONG_VERSION,
    about = "Turn images, videos and text into ASCII art and play ASCII animations"
)]
pub struct Cli {
    /// Animation library directory (overrides the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub library: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print an image as ASCII art
    Image {
        /// Image file (png, jpeg, gif, bmp, webp)
        path: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
        /// Write the art to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Convert a GIF or video into an animation
    #[command(long_about = "Convert a GIF or video into an animation.\n\n\
        GIFs are decoded directly, other formats need ffmpeg and ffprobe on PATH. \
        The animation JSON is written to --out, saved into the library with --save, \
        or printed to stdout.")]
    Video {
        path: PathBuf,
        /// Animation name (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Save into the library
        #[arg(long)]
        save: bool,
        /// Stop after this many source frames
        #[arg(long, value_name = "N")]
        max_frames: Option<usize>,
        /// Keep every Nth frame
        #[arg(long, value_name = "N", default_value_t = 1)]
        speed_up: usize,
        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print text as FIGlet ASCII art
    Text {
        text: String,
        /// Font name, .flf path, or "random"
        #[arg(short, long)]
        font: Option<String>,
    },

    /// List available FIGlet fonts
    Fonts,

    /// Build a text animation that types itself out
    Generate {
        text: String,
        /// Animation name (defaults to the text)
        #[arg(long)]
        name: Option<String>,
        /// Render the text with a FIGlet font first ("random" picks one)
        #[arg(short, long)]
        font: Option<String>,
        /// Padding around every frame
        #[arg(long, value_enum, default_value_t = PadStyle::None)]
        pad: PadStyle,
        /// Pattern for --pad simple
        #[arg(long, default_value = "o")]
        pad_str: String,
        #[arg(long, default_value_t = 1)]
        pad_x: usize,
        #[arg(long, default_value_t = 1)]
        pad_y: usize,
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
        #[arg(long)]
        save: bool,
    },

    /// Play animations (files or library names) in the terminal
    Play {
        #[arg(required = true, value_name = "ANIM")]
        animations: Vec<String>,
        #[command(flatten)]
        playback: PlaybackArgs,
        /// Print frames instead of the interactive player
        #[arg(long)]
        plain: bool,
    },

    /// List the animations in the library
    List,

    /// Browse, preview and play the library interactively
    Gallery {
        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Export animations to an asciicast v3 recording
    Export {
        #[arg(required = true, value_name = "ANIM")]
        animations: Vec<String>,
        /// Output .cast file
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
        /// Recording title
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Open the config file in $EDITOR
    Edit,
    /// Add missing fields to the config file
    Migrate {
        /// Apply without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the config file location
    Path,
}

/// Image rendering flags, each overriding the `[render]` config.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Output width in characters (default: terminal width)
    #[arg(short, long)]
    pub width: Option<u32>,
    /// Output height in lines (default: from the aspect ratio)
    #[arg(long)]
    pub height: Option<u32>,
    /// Fit inside width x height instead of stretching
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub keep_aspect: Option<bool>,
    #[arg(short, long, value_enum)]
    pub mode: Option<RenderMode>,
    /// Preset (standard, blocks, detailed, binary) or a literal ramp
    #[arg(short, long)]
    pub charset: Option<String>,
    /// Reverse the charset (for light terminals)
    #[arg(long)]
    pub invert: bool,
    /// Minimum edge strength for the edge modes (0-255)
    #[arg(long, value_name = "N")]
    pub edge_threshold: Option<u8>,
    /// Height/width ratio of a terminal cell
    #[arg(long, value_name = "RATIO")]
    pub char_aspect: Option<f32>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlaybackArgs {
    /// Loops per animation, -1 or "inf" for infinite
    #[arg(short, long, allow_hyphen_values = true)]
    pub loops: Option<LoopCount>,
    /// Milliseconds per tick
    #[arg(short, long, value_name = "MS")]
    pub delay: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadStyle {
    None,
    /// Repeat --pad-str around the frame
    Simple,
    /// Draw a box around the frame
    Frame,
}
