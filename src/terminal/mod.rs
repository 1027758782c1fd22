//! The raw-mode terminal the editing session runs on.
//!
//! [`Terminal`] is the seam between the session loop and the real screen:
//! [`CrosstermTerminal`] drives the user's terminal, tests drive a scripted
//! one. [`RawModeGuard`] makes sure the terminal is handed back in cooked
//! mode on every way out of a session.

mod backend;
mod input;

pub use backend::CrosstermTerminal;
pub use input::{map_event, map_key};

use std::io;
use std::ops::{Deref, DerefMut};

use crate::editor::EditorEvent;
use crate::ui::EditorScreen;

pub trait Terminal {
    /// Switch to raw, unbuffered, no-echo input and take over the screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be configured.
    fn enter(&mut self) -> io::Result<()>;

    /// Wait for the next input.
    ///
    /// `Ok(None)` means nothing the editor acts on arrived (a resize, a key
    /// with no binding, a timeout); the caller should redraw and ask again.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn next_event(&mut self) -> io::Result<Option<EditorEvent>>;

    /// Draw one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be written.
    fn render(&mut self, screen: &mut EditorScreen<'_>) -> io::Result<()>;

    /// Put the terminal back the way [`Terminal::enter`] found it.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal settings cannot be restored.
    fn restore(&mut self) -> io::Result<()>;
}

/// Holds a terminal in raw mode and restores it when dropped.
pub struct RawModeGuard<'t, T: Terminal + ?Sized> {
    terminal: &'t mut T,
}

impl<'t, T: Terminal + ?Sized> RawModeGuard<'t, T> {
    /// Enter raw mode on `terminal`.
    ///
    /// # Errors
    ///
    /// Returns the error from [`Terminal::enter`]. The terminal is restored
    /// before returning so a half-configured screen is not left behind.
    pub fn enter(terminal: &'t mut T) -> io::Result<Self> {
        if let Err(err) = terminal.enter() {
            let _ = terminal.restore();
            return Err(err);
        }
        Ok(Self { terminal })
    }
}

impl<T: Terminal + ?Sized> Deref for RawModeGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.terminal
    }
}

impl<T: Terminal + ?Sized> DerefMut for RawModeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.terminal
    }
}

impl<T: Terminal + ?Sized> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        if let Err(err) = self.terminal.restore() {
            tracing::warn!(error = %err, "failed to restore terminal settings");
        }
    }
}
