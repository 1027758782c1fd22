//! tedit - a small menu-driven plain-text line editor.
//!
//! # Usage
//!
//! ```bash
//! tedit
//! tedit notes.txt
//! tedit --max-lines 5000 --log-file tedit.log notes.txt
//! ```

use std::fs::File;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tedit::app::App;
use tedit::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    log_filter, save_config_flags,
};
use tedit::document::DEFAULT_MAX_LINES;

/// A menu-driven plain-text line editor
#[derive(Parser, Debug)]
#[command(name = "tedit", version, about, long_about = None)]
struct Cli {
    /// File to open before the menu is shown
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Maximum number of lines a document may hold
    #[arg(long, value_name = "N")]
    max_lines: Option<NonZeroUsize>,

    /// Do not print file content after opening a file
    #[arg(short, long)]
    quiet: bool,

    /// Hide the line-number gutter while editing
    #[arg(long)]
    no_line_numbers: bool,

    /// Write log output to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            quiet: self.quiet,
            no_line_numbers: self.no_line_numbers,
            max_lines: self.max_lines.map(NonZeroUsize::get),
            log_file: self.log_file.clone(),
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = log_filter(&std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default());

    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    let app = App::new()
        .with_initial_file(cli.file)
        .with_max_lines(effective.max_lines.unwrap_or(DEFAULT_MAX_LINES))
        .with_quiet(effective.quiet)
        .with_line_numbers(!effective.no_line_numbers);

    app.run().context("Application error")
}
