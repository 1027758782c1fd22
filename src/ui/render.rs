use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::ToastLevel;
use crate::document::Document;
use crate::editor::Cursor;

use super::status;

/// Everything needed to draw one frame of the editing session.
#[derive(Debug)]
pub struct EditorScreen<'a> {
    pub document: &'a Document,
    pub cursor: Cursor,
    /// First document line shown. [`render_editor`] moves it to keep the
    /// cursor on screen.
    pub scroll_offset: usize,
    pub toast: Option<(&'a str, ToastLevel)>,
    pub line_numbers: bool,
}

/// Draw the text area, the optional message bar and the status bar.
pub fn render_editor(screen: &mut EditorScreen<'_>, frame: &mut Frame) {
    let area = frame.area();

    let toast_active = screen.toast.is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let editor_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    let buffer = screen.document.buffer();
    let total_lines = buffer.line_count();
    let gutter_width = if screen.line_numbers {
        line_number_width(total_lines) + 1
    } else {
        0
    };

    let visible_height = editor_area.height as usize;
    screen.scroll_offset =
        scroll_offset_for(screen.scroll_offset, screen.cursor.row, visible_height);
    let start = screen.scroll_offset;
    let end = (start + visible_height).min(total_lines);

    // Scroll sideways when the cursor runs off the right edge.
    let text_width = usize::from(editor_area.width.saturating_sub(gutter_width)).max(1);
    let h_offset = (screen.cursor.col + 1).saturating_sub(text_width);

    let mut content: Vec<Line> = Vec::with_capacity(end.saturating_sub(start));
    for row in start..end {
        let bytes = buffer.line(row).as_bytes();
        let visible = bytes.get(h_offset..).unwrap_or_default();

        let mut spans = Vec::new();
        if screen.line_numbers {
            let line_num = format!(
                "{:>width$} ",
                row + 1,
                width = usize::from(gutter_width - 1)
            );
            spans.push(Span::styled(line_num, Style::default().fg(Color::DarkGray)));
        }

        if row == screen.cursor.row {
            // The cursor may sit past the end of the line; show the gap as
            // blank cells so the cursor lands where the next character goes.
            let col = screen.cursor.col - h_offset;
            let before = visible.get(..col).unwrap_or(visible);
            let gap = col.saturating_sub(visible.len());
            let cursor_char = visible.get(col..=col).map_or_else(|| " ".to_string(), lossy);
            let after = visible.get(col + 1..).unwrap_or_default();

            if !before.is_empty() {
                spans.push(Span::raw(lossy(before)));
            }
            if gap > 0 {
                spans.push(Span::raw(" ".repeat(gap)));
            }
            spans.push(Span::styled(
                cursor_char,
                Style::default().bg(Color::White).fg(Color::Black),
            ));
            if !after.is_empty() {
                spans.push(Span::raw(lossy(after)));
            }
        } else {
            spans.push(Span::raw(lossy(visible)));
        }

        content.push(Line::from(spans));
    }

    let doc = Paragraph::new(content);
    frame.render_widget(Clear, editor_area);
    frame.render_widget(doc, editor_area);

    if let Some((message, level)) = screen.toast {
        status::render_toast_bar(message, level, frame, toast_area);
    }

    status::render_status_bar(screen, frame, status_area);
}

/// The first line to show so that `cursor_row` stays on screen.
///
/// Moves the previous offset as little as possible.
pub const fn scroll_offset_for(offset: usize, cursor_row: usize, visible_height: usize) -> usize {
    if visible_height == 0 {
        return cursor_row;
    }
    if cursor_row < offset {
        cursor_row
    } else if cursor_row >= offset + visible_height {
        cursor_row + 1 - visible_height
    } else {
        offset
    }
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
