use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Flags that can be given on the command line or saved in a flag file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub quiet: bool,
    pub no_line_numbers: bool,
    pub max_lines: Option<usize>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets. Switches are or-ed; valued flags from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            quiet: self.quiet || other.quiet,
            no_line_numbers: self.no_line_numbers || other.no_line_numbers,
            max_lines: other.max_lines.or(self.max_lines),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

/// Log filter used by the binary: the given directives (normally `RUST_LOG`)
/// plus a WARN floor.
///
/// Nothing reaches WARN while the editing screen is up unless the terminal
/// itself misbehaves; refused edits and failed opens log at DEBUG.
pub fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::new(directives).add_directive(tracing::Level::WARN.into())
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("tedit").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("tedit")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("tedit").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("tedit").join("config");
        }
    }

    PathBuf::from(".teditrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".teditrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Split one flag-file line into tokens. A `--log-file` line keeps the rest
/// of the line as the path, spaces included.
fn line_tokens(line: &str) -> Vec<String> {
    if let Some(path) = line
        .strip_prefix("--log-file=")
        .or_else(|| line.strip_prefix("--log-file "))
    {
        return vec![format!("--log-file={}", path.trim())];
    }
    line.split_whitespace().map(ToOwned::to_owned).collect()
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# tedit defaults (saved with --save)".to_string());
    if flags.quiet {
        lines.push("--quiet".to_string());
    }
    if flags.no_line_numbers {
        lines.push("--no-line-numbers".to_string());
    }
    if let Some(max) = flags.max_lines {
        lines.push(format!("--max-lines {max}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file={}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the flags this module knows out of a raw token list.
///
/// Unknown tokens (the program name, a file argument, `--save`) are skipped.
/// A `--max-lines` value that is not a positive number is ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--quiet" || token == "-q" {
            flags.quiet = true;
        } else if token == "--no-line-numbers" {
            flags.no_line_numbers = true;
        } else if token == "--max-lines" {
            if let Some(next) = tokens.get(i + 1) {
                flags.max_lines = parse_max_lines(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--max-lines=") {
            flags.max_lines = parse_max_lines(value);
        } else if token == "--log-file" {
            if let Some(next) = tokens.get(i + 1) {
                flags.log_file = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--log-file=") {
            flags.log_file = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

fn parse_max_lines(s: &str) -> Option<usize> {
    s.parse::<usize>().ok().filter(|&n| n > 0)
}
