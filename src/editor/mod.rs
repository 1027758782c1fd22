//! Cursor-addressed editing of a [`Document`](crate::document::Document).
//!
//! The [`CursorEditor`] is a small state machine: it holds a [`Cursor`] and
//! applies one [`EditorEvent`] at a time to the document's line buffer.

mod state;

pub use state::{CursorEditor, Step};

/// Cursor position in the document.
///
/// `col` may sit past the end of the line after a vertical move; the next
/// character typed there pads the line with spaces up to the cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Create a cursor at a specific position.
    pub const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Normalized input understood by the editor.
///
/// The terminal layer turns raw key presses into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Insert a printable character at the cursor
    InsertChar(char),
    /// Delete the character before the cursor
    Backspace,
    /// Break the line at the cursor (Enter)
    SplitLine,
    /// Write the document to its file
    Save,
    /// Leave the editing session
    Exit,
}
