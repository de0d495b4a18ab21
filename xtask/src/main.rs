//! Development tasks: `cargo run -p xtask -- <task>`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use animascii::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask", about = "animascii development tasks")]
struct Args {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for animascii and every subcommand
    Man {
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
    /// Generate completion scripts for all supported shells
    Completions {
        #[arg(long, default_value = "target/completions")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    match Args::parse().task {
        Task::Man { out } => generate_man(&out),
        Task::Completions { out } => generate_completions(&out),
    }
}

fn generate_man(out: &Path) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;
    let cmd = Cli::command();

    write_page(out, "animascii", cmd.clone())?;
    for sub in cmd.get_subcommands() {
        let name = format!("animascii-{}", sub.get_name());
        write_page(out, &name, sub.clone().name(name.clone()))?;
    }
    println!("Man pages written to {}", out.display());
    Ok(())
}

fn write_page(out: &Path, name: &str, cmd: clap::Command) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd).render(&mut buffer)?;
    let path = out.join(format!("{name}.1"));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn generate_completions(out: &Path) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;
    let mut cmd = Cli::command();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
        let path = clap_complete::generate_to(shell, &mut cmd, "animascii", out)?;
        println!("{}", path.display());
    }
    Ok(())
}
