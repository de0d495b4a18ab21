//! Subcommand handlers and the helpers they share.

pub mod completions;
pub mod config;
pub mod export;
pub mod gallery;
pub mod generate;
pub mod image;
pub mod list;
pub mod play;
pub mod text;
pub mod video;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use animascii::cli::{Cli, Commands, ConfigCommands, PlaybackArgs, RenderArgs};
use animascii::render::{Charset, RenderOptions};
use animascii::theme::current_theme;
use animascii::{Animation, Config, Library, LoopCount, Playlist};

/// Width used when neither the flag, the config nor the terminal says.
const FALLBACK_WIDTH: u32 = 80;

/// Loaded configuration plus the global flags.
pub struct Session {
    pub config: Config,
    pub library_dir: PathBuf,
}

impl Session {
    fn new(library: Option<PathBuf>) -> Result<Self> {
        let config = Config::load()?;
        let library_dir = match library {
            Some(dir) => dir,
            None => config.library_dir()?,
        };
        tracing::debug!(library = %library_dir.display(), "session ready");
        Ok(Self {
            config,
            library_dir,
        })
    }

    pub fn open_library(&self) -> Result<Library> {
        Library::open(&self.library_dir)
    }

    /// Loop count from the flag or `[player] loops`.
    pub fn loops(&self, playback: &PlaybackArgs) -> Result<LoopCount> {
        match playback.loops {
            Some(loops) => Ok(loops),
            None => self.config.player.loop_count(),
        }
    }
}

/// Dispatch a parsed command line.
#[cfg(not(tarpaulin_include))]
pub fn run(cli: Cli) -> Result<()> {
    // These work without (or despite) a config file
    match &cli.command {
        Commands::Config(cmd) => {
            return match cmd {
                ConfigCommands::Show => config::handle_show(),
                ConfigCommands::Edit => config::handle_edit(),
                ConfigCommands::Migrate { yes } => config::handle_migrate(*yes),
                ConfigCommands::Path => config::handle_path(),
            };
        }
        Commands::Completions { shell } => return completions::handle(*shell),
        _ => {}
    }

    let session = Session::new(cli.library)?;
    match cli.command {
        Commands::Image { path, render, out } => image::handle(&path, &render, out.as_deref(), &session),
        Commands::Video {
            path,
            name,
            out,
            save,
            max_frames,
            speed_up,
            render,
        } => video::handle(
            &video::VideoRequest {
                path,
                name,
                out,
                save,
                max_frames,
                speed_up,
                render,
            },
            &session,
        ),
        Commands::Text { text, font } => text::handle(&text, font.as_deref(), &session),
        Commands::Fonts => text::handle_fonts(&session),
        Commands::Generate {
            text,
            name,
            font,
            pad,
            pad_str,
            pad_x,
            pad_y,
            out,
            save,
        } => generate::handle(
            &generate::GenerateRequest {
                text,
                name,
                font,
                pad,
                pad_str,
                pad_x,
                pad_y,
                out,
                save,
            },
            &session,
        ),
        Commands::Play {
            animations,
            playback,
            plain,
        } => play::handle(&animations, &playback, plain, &session),
        Commands::List => list::handle(&session),
        Commands::Gallery { playback } => gallery::handle(&playback, &session),
        Commands::Export {
            animations,
            out,
            title,
            playback,
        } => export::handle(&animations, &out, title.as_deref(), &playback, &session),
        Commands::Config(_) | Commands::Completions { .. } => Ok(()),
    }
}

/// Current terminal width in columns.
pub fn terminal_width() -> Option<u32> {
    terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| u32::from(w))
}

/// Merge render flags over the `[render]` config.
pub fn render_options(config: &Config, args: &RenderArgs, fallback_width: u32) -> Result<RenderOptions> {
    let mut opts = config.render_options(fallback_width)?;
    if let Some(width) = args.width {
        opts.width = width;
    }
    opts.height = args.height;
    if let Some(keep) = args.keep_aspect {
        opts.keep_aspect = keep;
    }
    if let Some(mode) = args.mode {
        opts.mode = mode;
    }
    if let Some(spec) = &args.charset {
        opts.charset = Charset::from_spec(spec).with_context(|| format!("Invalid charset '{spec}'"))?;
        if config.render.invert {
            opts.charset = opts.charset.inverted();
        }
    }
    // --invert flips whatever the config decided
    if args.invert {
        opts.charset = opts.charset.inverted();
    }
    if let Some(threshold) = args.edge_threshold {
        opts.edge_threshold = threshold;
    }
    if let Some(aspect) = args.char_aspect {
        opts.char_aspect = aspect;
    }
    if !opts.charset.is_uniform_width() {
        tracing::warn!("charset glyphs have different widths, rows will be ragged");
    }
    Ok(opts)
}

/// Default render width: terminal width, else 80.
pub fn default_width() -> u32 {
    terminal_width().unwrap_or(FALLBACK_WIDTH)
}

/// Load an animation from a file path or a library name.
pub fn resolve_animation(spec: &str, library: &Library) -> Result<Animation> {
    let path = Path::new(spec);
    if path.is_file() {
        return Ok(Animation::load(path)?);
    }
    match library.find(spec) {
        Some(item) => item.load(),
        None => bail!(
            "Animation not found: {} (not a file or a name in {})",
            spec,
            library.dir().display()
        ),
    }
}

/// Build a playlist giving every animation the same loop count.
pub fn build_playlist(specs: &[String], library: &Library, loops: LoopCount) -> Result<Playlist> {
    let mut playlist = Playlist::default();
    for spec in specs {
        let animation = resolve_animation(spec, library)?;
        if animation.is_empty() {
            tracing::warn!(name = %animation.name, "animation has no frames");
        }
        playlist.push(animation, loops);
    }
    Ok(playlist)
}

/// Write to `--out`, save into the library with `--save`, or print the JSON.
pub fn write_animation(animation: &Animation, out: Option<&Path>, save: bool, session: &Session) -> Result<()> {
    let theme = current_theme();
    if let Some(out) = out {
        animation.save(out)?;
        println!(
            "{}",
            theme.success_text(&format!(
                "Wrote {} frames to {}",
                animation.frame_count(),
                out.display()
            ))
        );
    }
    if save {
        let mut library = session.open_library()?;
        let path = library.save(animation)?;
        println!(
            "{}",
            theme.success_text(&format!("Saved '{}' to {}", animation.name, path.display()))
        );
    }
    if out.is_none() && !save {
        println!("{}", animation.to_json()?);
    }
    Ok(())
}
