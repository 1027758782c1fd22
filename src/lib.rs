// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorEvent)
    clippy::module_name_repetitions
)]

//! # tedit
//!
//! A cursor-driven plain-text line editor behind a numeric menu.
//!
//! ## Architecture
//!
//! - A [`document::LineBuffer`] holds a bounded list of byte lines
//! - A [`editor::CursorEditor`] applies one [`editor::EditorEvent`] at a time
//!   to the buffer at a cursor position
//! - The [`app`] session loop reads events from a [`terminal::Terminal`] in raw
//!   mode and draws each frame with [`ui::render_editor`]
//!
//! ## Modules
//!
//! - [`app`]: Menu front end and editing session
//! - [`config`]: Saved and command-line flags
//! - [`document`]: Line buffer, file load and save
//! - [`editor`]: Cursor editing state machine
//! - [`terminal`]: Raw-mode terminal and key mapping
//! - [`ui`]: Rendering of the editing screen

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod terminal;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::App;
    pub use crate::document::{BufferError, Document, LineBuffer};
    pub use crate::editor::{Cursor, CursorEditor, EditorEvent};
}
