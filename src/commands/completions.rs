//! `animascii completions`

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use animascii::cli::Cli;

pub fn handle(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "animascii", &mut io::stdout());
    Ok(())
}
