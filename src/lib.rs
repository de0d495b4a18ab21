//! animascii - ASCII art and terminal animations
//!
//! Images and video frames become ASCII through [`render`], text through
//! FIGlet fonts in [`text`], and [`generate`] builds animations from text.
//! Animations are JSON files kept in a [`animation::Library`] and played by
//! [`player`], browsed in the [`tui`] gallery or exported with [`asciicast`].

pub mod animation;
pub mod asciicast;
pub mod cli;
pub mod config;
pub mod files;
pub mod frame;
pub mod generate;
pub mod logging;
pub mod player;
pub mod render;
pub mod text;
pub mod theme;
pub mod tui;

pub use animation::{Animation, Library};
pub use config::Config;
pub use player::{LoopCount, Playlist};
