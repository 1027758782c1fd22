//! Documents: a line buffer plus the file it belongs to.
//!
//! This module handles:
//! - The capacity-bounded [`LineBuffer`] and its [`Line`]s
//! - Loading a document from disk and saving it back
//! - Creating a new, empty document file

mod buffer;
mod error;

pub use buffer::{DEFAULT_MAX_LINES, Line, LineBuffer};
pub use error::{BufferError, Result};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// The document being edited.
///
/// Holds the lines and the path they were loaded from or will be saved to.
/// A document handed out by this module always has at least one line.
#[derive(Debug, Clone)]
pub struct Document {
    buffer: LineBuffer,
    path: Option<PathBuf>,
    dirty: bool,
    dropped_lines: usize,
}

impl Document {
    /// An unnamed document with a single empty line.
    pub fn scratch(max_lines: usize) -> Self {
        Self::with_single_empty_line(max_lines, None)
    }

    /// Load the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::SourceUnavailable`] if the file cannot be opened
    /// or read.
    pub fn open(path: impl Into<PathBuf>, max_lines: usize) -> Result<Self> {
        let path = path.into();
        let source_error = |source| BufferError::SourceUnavailable {
            path: path.clone(),
            source,
        };

        let file = File::open(&path).map_err(source_error)?;
        let mut buffer = LineBuffer::with_capacity_limit(max_lines);
        let dropped_lines = buffer
            .load_from(BufReader::new(file))
            .map_err(source_error)?;

        tracing::info!(
            path = %path.display(),
            lines = buffer.line_count(),
            dropped_lines,
            "document loaded"
        );

        Ok(Self {
            buffer,
            path: Some(path),
            dirty: false,
            dropped_lines,
        })
    }

    /// Create (or truncate) the file at `path` and return an empty document
    /// bound to it.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::SinkUnavailable`] if the file cannot be created.
    pub fn create(path: impl Into<PathBuf>, max_lines: usize) -> Result<Self> {
        let path = path.into();
        File::create(&path).map_err(|source| BufferError::SinkUnavailable {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "document created");
        Ok(Self::with_single_empty_line(max_lines, Some(path)))
    }

    /// Write the document to its file.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::NoFileAssociated`] for a scratch document and
    /// [`BufferError::SinkUnavailable`] if the file cannot be opened or
    /// written.
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Err(BufferError::NoFileAssociated);
        };
        let sink_error = |source| BufferError::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(sink_error)?;
        self.buffer
            .save_to(BufWriter::new(file))
            .map_err(sink_error)?;

        tracing::info!(
            path = %path.display(),
            lines = self.buffer.line_count(),
            "document saved"
        );
        self.dirty = false;
        Ok(())
    }

    /// File name for display, or `untitled` for a scratch document.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string())
    }

    pub const fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub const fn buffer_mut(&mut self) -> &mut LineBuffer {
        &mut self.buffer
    }

    /// Record that the lines changed since the last load or save.
    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether the document changed since it was loaded, created or saved.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Lines that did not fit under the line limit when the file was loaded.
    pub const fn dropped_lines(&self) -> usize {
        self.dropped_lines
    }

    fn with_single_empty_line(max_lines: usize, path: Option<PathBuf>) -> Self {
        let mut buffer = LineBuffer::with_capacity_limit(max_lines);
        // The limit is never below one, so this append cannot be refused.
        let _ = buffer.append(Line::default());
        Self {
            buffer,
            path,
            dirty: false,
            dropped_lines: 0,
        }
    }
}
