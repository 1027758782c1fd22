//! Terminal UI components.
//!
//! This module draws the editing session:
//! - [`render_editor`]: the text area with line numbers and cursor
//! - status and message bars at the bottom of the screen

mod render;
mod status;

pub use render::{EditorScreen, line_number_width, render_editor, scroll_offset_for};
