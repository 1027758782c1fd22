use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::document::Document;
use crate::editor::{CursorEditor, Step};
use crate::terminal::{RawModeGuard, Terminal};
use crate::ui::EditorScreen;

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

impl Toast {
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        }
    }
}

/// Run one interactive editing session on `document`.
///
/// The terminal is held in raw mode for the whole session and restored on
/// return, whether the user pressed Esc or reading input failed. Refused
/// edits and failed saves are shown on the message bar; editing goes on.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to, or read.
pub fn edit<T: Terminal + ?Sized>(
    terminal: &mut T,
    document: &mut Document,
    line_numbers: bool,
) -> Result<()> {
    let mut terminal =
        RawModeGuard::enter(terminal).context("Failed to switch the terminal to raw mode")?;
    let mut editor = CursorEditor::new(document);
    let dropped = editor.document().dropped_lines();
    let mut toast = (dropped > 0).then(|| {
        Toast::new(
            ToastLevel::Warning,
            format!(
                "{dropped} lines past the limit of {} were not loaded",
                editor.document().buffer().capacity_limit()
            ),
        )
    });
    let mut scroll_offset = 0;

    tracing::info!(document = %editor.document().display_name(), "editing session started");

    loop {
        let now = Instant::now();
        if toast.as_ref().is_some_and(|t| t.expires_at <= now) {
            toast = None;
        }

        let mut screen = EditorScreen {
            document: editor.document(),
            cursor: editor.cursor(),
            scroll_offset,
            toast: toast.as_ref().map(|t| (t.message.as_str(), t.level)),
            line_numbers,
        };
        terminal
            .render(&mut screen)
            .context("Failed to draw the editor")?;
        scroll_offset = screen.scroll_offset;

        let Some(event) = terminal
            .next_event()
            .context("Failed to read terminal input")?
        else {
            continue;
        };

        match editor.handle(event) {
            Ok(Step::Continue) => {}
            Ok(Step::Saved) => {
                let name = editor.document().display_name();
                tracing::info!(document = %name, "saved");
                toast = Some(Toast::new(ToastLevel::Info, format!("Saved {name}")));
            }
            Ok(Step::Exit) => break,
            Err(err) => {
                tracing::debug!(?event, error = %err, "edit refused");
                toast = Some(Toast::new(ToastLevel::Error, err.to_string()));
            }
        }
    }

    tracing::info!(
        dirty = editor.document().is_dirty(),
        "editing session ended"
    );
    Ok(())
}
