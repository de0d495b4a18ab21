//! `animascii config` subcommands

use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use animascii::config::{migrate_config, MigrateResult};
use animascii::theme::{current_theme, Theme};
use animascii::Config;

/// Print the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    let theme = current_theme();
    println!("{}", theme.primary_text(toml_str.trim_end()));
    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Open the config file in `$EDITOR` (default `vi`), creating it first.
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let config_path = Config::config_path()?;
    let theme = current_theme();

    if !config_path.exists() {
        Config::default().save_to(&config_path)?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    println!(
        "{}",
        theme.primary_text(&format!("Opening {} with {}", config_path.display(), editor))
    );

    let status = std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to open editor '{editor}'"))?;
    if !status.success() {
        anyhow::bail!("Editor exited with {status}");
    }

    // Surface mistakes right away instead of on the next command
    Config::load_from(&config_path)?;
    Ok(())
}

/// Add missing fields to the config file after showing what changes.
#[cfg(not(tarpaulin_include))]
pub fn handle_migrate(yes: bool) -> Result<()> {
    let theme = current_theme();
    let config_path = Config::config_path()?;
    let file_exists = config_path.exists();

    let content = if file_exists {
        fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?
    } else {
        String::new()
    };

    let result = migrate_config(&content)?;
    if !result.has_changes() {
        println!("{}", theme.primary_text("Config is already up to date."));
        return Ok(());
    }

    let question = if file_exists {
        println!("{}", theme.primary_text(&summary(&result)));
        println!();
        print_lines(&diff_preview(&result, false), &theme);
        format!("Apply these changes to {}?", config_path.display())
    } else {
        println!(
            "{}",
            theme.primary_text("Config file does not exist. Will create with default settings.")
        );
        println!();
        print_lines(&diff_preview(&result, true), &theme);
        format!("Create {}?", config_path.display())
    };
    println!();

    if !yes && !prompt_confirmation(&question)? {
        println!("{}", theme.primary_text("No changes made."));
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, &result.content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("{}", theme.success_text("Config updated successfully."));
    Ok(())
}

fn summary(result: &MigrateResult) -> String {
    let fields = result.added_fields.len();
    match result.sections_added.len() {
        0 => format!("Found {fields} missing field(s):"),
        sections => format!("Found {fields} missing field(s) in {sections} new section(s):"),
    }
}

/// A preview line: `true` when it is an addition.
type PreviewLine = (bool, String);

/// Added lines of `result.content` under their section headers. Headers of
/// sections that already existed are context, not additions.
fn diff_preview(result: &MigrateResult, is_new_file: bool) -> Vec<PreviewLine> {
    let added: HashSet<&str> = result.added_fields.iter().map(String::as_str).collect();
    let mut out = Vec::new();
    let mut section = String::new();
    let mut pending_header: Option<String> = None;

    for line in result.content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            section = trimmed[1..trimmed.len() - 1].to_string();
            pending_header = Some(line.to_string());
            continue;
        }

        let is_added = match trimmed.split_once('=') {
            Some((key, _)) => is_new_file || added.contains(format!("{section}.{}", key.trim()).as_str()),
            None => is_new_file && !trimmed.is_empty(),
        };
        if !is_added {
            continue;
        }
        if let Some(header) = pending_header.take() {
            let header_added = is_new_file || result.sections_added.contains(&section);
            out.push((header_added, header));
        }
        out.push((true, line.to_string()));
    }
    out
}

fn print_lines(lines: &[PreviewLine], theme: &Theme) {
    for (added, line) in lines {
        if *added {
            println!("{}", theme.success_text(&format!("+ {line}")));
        } else {
            println!("  {line}");
        }
    }
}

/// Ask a yes/no question. Non-interactive stdin answers no.
fn prompt_confirmation(message: &str) -> Result<bool> {
    let theme = current_theme();

    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{}",
            theme.secondary_text("Non-interactive mode: use --yes to apply changes automatically")
        );
        return Ok(false);
    }

    print!("{} [y/N] ", theme.primary_text(message));
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
