use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::ToastLevel;

use super::EditorScreen;

pub fn render_status_bar(screen: &EditorScreen<'_>, frame: &mut Frame, area: Rect) {
    let document = screen.document;
    let filename = document.display_name();
    let dirty_indicator = if document.is_dirty() { " [modified]" } else { "" };

    let buffer = document.buffer();
    let line_info = format!(
        "Ln {}, Col {}  {}/{} lines",
        screen.cursor.row + 1,
        screen.cursor.col + 1,
        buffer.line_count(),
        buffer.capacity_limit()
    );

    let status = format!(" EDIT  {filename}{dirty_indicator}  {line_info}  Ctrl+S:save  Esc:exit");

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::Magenta).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(message: &str, level: ToastLevel, frame: &mut Frame, area: Rect) {
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
