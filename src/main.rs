//! animascii command line entry point

mod commands;

use std::process::ExitCode;

use clap::Parser;

use animascii::cli::Cli;
use animascii::logging::init_tracing;
use animascii::theme::current_theme;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let theme = current_theme();
            eprintln!("{}", theme.error_text(&format!("Error: {e:#}")));
            ExitCode::FAILURE
        }
    }
}
