//! The menu front end and the interactive editing session.
//!
//! - [`App::run`]: numeric menu on stdin/stdout (open, create, edit, quit)
//! - [`edit`]: one raw-mode editing session on a [`Terminal`](crate::terminal::Terminal)

mod menu;
mod session;

pub use session::{ToastLevel, edit};

use std::path::PathBuf;

use crate::document::DEFAULT_MAX_LINES;

/// Menu-driven editor front end.
#[derive(Debug, Clone)]
pub struct App {
    initial_file: Option<PathBuf>,
    max_lines: usize,
    quiet: bool,
    line_numbers: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub const fn new() -> Self {
        Self {
            initial_file: None,
            max_lines: DEFAULT_MAX_LINES,
            quiet: false,
            line_numbers: true,
        }
    }

    /// Open this file before the menu is shown.
    pub fn with_initial_file(mut self, path: Option<PathBuf>) -> Self {
        self.initial_file = path;
        self
    }

    /// Line limit for documents opened or created from the menu.
    pub const fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Skip printing file content after a successful open.
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Show the line-number gutter in the editing session.
    pub const fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self
    }
}
