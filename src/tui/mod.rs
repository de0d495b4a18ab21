//! Terminal control panel for the animation library
//!
//! Built on ratatui/crossterm. `gallery` holds the pure state and the
//! drawing code, `app` owns the terminal.

pub mod app;
pub mod gallery;
pub mod status_footer;
pub mod ui;

pub use app::App;
pub use gallery::{run_gallery, GalleryAction, GalleryOptions, GalleryState, Mode};
