//! Integration tests driving the animascii binary.

mod cli_test;
mod export_test;
mod filename_test;
mod generate_test;
mod helpers;
mod library_test;
mod render_test;
