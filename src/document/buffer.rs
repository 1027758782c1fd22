use std::borrow::Cow;
use std::fmt;
use std::io::{self, Read, Write};

use super::error::{BufferError, Result};

/// Maximum number of lines a buffer holds unless configured otherwise.
pub const DEFAULT_MAX_LINES: usize = 1000;

/// One line of text, without its terminator.
///
/// Content is kept as single-byte code units so that column arithmetic is
/// plain indexing. The length is always derived from the content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    content: Vec<u8>,
}

impl Line {
    /// Create a line from raw bytes. The bytes must not contain `\n`.
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        let content = content.into();
        debug_assert!(!content.contains(&b'\n'), "line content holds a terminator");
        Self { content }
    }

    /// Number of columns in the line.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.content
    }

    /// The line as text for display. Invalid UTF-8 is replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }

    /// Insert `byte` at `col`, shifting everything at and after `col` right.
    ///
    /// # Panics
    ///
    /// Panics if `col > self.len()`; pad the line first.
    pub fn insert(&mut self, col: usize, byte: u8) {
        self.content.insert(col, byte);
    }

    /// Remove and return the byte at `col`, shifting the tail left.
    ///
    /// # Panics
    ///
    /// Panics if `col >= self.len()`.
    pub fn remove(&mut self, col: usize) -> u8 {
        self.content.remove(col)
    }

    /// Grow the line with spaces until it is `col` columns long.
    ///
    /// Existing content is kept. Does nothing if the line is already at
    /// least that long.
    pub fn pad_to(&mut self, col: usize) {
        if col > self.content.len() {
            self.content.resize(col, b' ');
        }
    }

    /// A copy of the columns from `col` to the end. Empty past the end.
    pub fn tail(&self, col: usize) -> Self {
        Self {
            content: self.content.get(col..).unwrap_or_default().to_vec(),
        }
    }

    /// Shorten the line to `col` columns. Does nothing past the end.
    pub fn truncate(&mut self, col: usize) {
        self.content.truncate(col);
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// An ordered, capacity-bounded sequence of lines.
///
/// Appends and inserts past the line limit are refused with
/// [`BufferError::CapacityExceeded`] and leave the buffer as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<Line>,
    max_lines: usize,
}

impl LineBuffer {
    /// Create an empty buffer holding at most [`DEFAULT_MAX_LINES`] lines.
    pub const fn new() -> Self {
        Self::with_capacity_limit(DEFAULT_MAX_LINES)
    }

    /// Create an empty buffer holding at most `max_lines` lines.
    ///
    /// The limit is never below one so a loaded buffer can always hold
    /// its single empty line.
    pub const fn with_capacity_limit(max_lines: usize) -> Self {
        Self {
            lines: Vec::new(),
            max_lines: if max_lines == 0 { 1 } else { max_lines },
        }
    }

    /// Build a buffer from in-memory text, split the same way as [`Self::load_from`].
    #[cfg(test)]
    fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        let mut lines = split_lines(text.as_bytes());
        lines.truncate(buffer.max_lines);
        buffer.lines = lines;
        buffer
    }

    pub const fn capacity_limit(&self) -> usize {
        self.max_lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.max_lines
    }

    /// The line at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.line_count()`.
    pub fn line(&self, index: usize) -> &Line {
        &self.lines[index]
    }

    /// Mutable access to the line at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.line_count()`.
    pub fn line_mut(&mut self, index: usize) -> &mut Line {
        &mut self.lines[index]
    }

    /// Length of the line at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.line_count()`.
    pub fn line_len(&self, index: usize) -> usize {
        self.lines[index].len()
    }

    pub fn lines(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Append `line` as the new last line.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::CapacityExceeded`] when the buffer is full.
    pub fn append(&mut self, line: impl Into<Line>) -> Result<()> {
        self.check_capacity()?;
        self.lines.push(line.into());
        Ok(())
    }

    /// Insert `line` at `index`, shifting later lines down by one.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::CapacityExceeded`] when the buffer is full.
    ///
    /// # Panics
    ///
    /// Panics if `index > self.line_count()`.
    pub fn insert_line(&mut self, index: usize, line: impl Into<Line>) -> Result<()> {
        self.check_capacity()?;
        self.lines.insert(index, line.into());
        Ok(())
    }

    /// Append empty lines until a line exists at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::CapacityExceeded`] if the limit is hit first.
    /// Lines appended before that point stay.
    pub fn ensure_line_at(&mut self, index: usize) -> Result<()> {
        while self.lines.len() <= index {
            self.append(Line::default())?;
        }
        Ok(())
    }

    /// Replace the contents with the lines read from `reader`.
    ///
    /// Lines are split on `\n` and exactly one terminator is stripped per
    /// line. Empty input yields a single empty line. If reading fails the
    /// buffer is left untouched.
    ///
    /// Returns the number of lines refused because the buffer was full.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while reading.
    pub fn load_from<R: Read>(&mut self, mut reader: R) -> io::Result<usize> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        let mut lines = split_lines(&data);
        let refused = lines.len().saturating_sub(self.max_lines);
        if refused > 0 {
            tracing::debug!(
                max = self.max_lines,
                refused,
                "line limit reached while loading; extra lines dropped"
            );
            lines.truncate(self.max_lines);
        }
        self.lines = lines;
        Ok(refused)
    }

    /// Write every line followed by `\n`, including the last one.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by `writer`. Lines already written stay
    /// written.
    pub fn save_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for line in &self.lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    fn check_capacity(&self) -> Result<()> {
        if self.is_full() {
            tracing::debug!(max = self.max_lines, "line limit reached");
            return Err(BufferError::CapacityExceeded {
                max: self.max_lines,
            });
        }
        Ok(())
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn split_lines(data: &[u8]) -> Vec<Line> {
    if data.is_empty() {
        return vec![Line::default()];
    }
    let body = data.strip_suffix(b"\n").unwrap_or(data);
    body.split(|&b| b == b'\n').map(Line::new).collect()
}
