use std::io;
use std::time::Duration;

use crossterm::event;
use ratatui::DefaultTerminal;

use crate::editor::EditorEvent;
use crate::ui::{EditorScreen, render_editor};

use super::{Terminal, map_event};

/// How long to wait for input before redrawing anyway, so that messages on
/// the toast bar can expire.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// The user's terminal, driven through crossterm and drawn with ratatui.
#[derive(Default)]
pub struct CrosstermTerminal {
    terminal: Option<DefaultTerminal>,
}

impl CrosstermTerminal {
    pub const fn new() -> Self {
        Self { terminal: None }
    }
}

impl Terminal for CrosstermTerminal {
    fn enter(&mut self) -> io::Result<()> {
        if self.terminal.is_some() {
            return Ok(());
        }
        match ratatui::try_init() {
            Ok(terminal) => {
                self.terminal = Some(terminal);
                Ok(())
            }
            Err(err) => {
                // Raw mode may already be on even though setup failed.
                let _ = ratatui::try_restore();
                Err(err)
            }
        }
    }

    fn next_event(&mut self) -> io::Result<Option<EditorEvent>> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(None);
        }
        Ok(map_event(&event::read()?))
    }

    fn render(&mut self, screen: &mut EditorScreen<'_>) -> io::Result<()> {
        let Some(terminal) = self.terminal.as_mut() else {
            return Err(io::Error::other("terminal is not in raw mode"));
        };
        terminal.draw(|frame| render_editor(screen, frame))?;
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.terminal.take().is_some() {
            ratatui::try_restore()?;
        }
        Ok(())
    }
}
