use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::editor::EditorEvent;

/// Translate a terminal event into an editor event.
pub fn map_event(event: &Event) -> Option<EditorEvent> {
    match event {
        Event::Key(key) => map_key(*key),
        _ => None,
    }
}

/// Translate one key press.
///
/// Key releases, unbound keys and modified characters map to `None`.
pub fn map_key(key: KeyEvent) -> Option<EditorEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Up => Some(EditorEvent::MoveUp),
        KeyCode::Down => Some(EditorEvent::MoveDown),
        KeyCode::Left => Some(EditorEvent::MoveLeft),
        KeyCode::Right => Some(EditorEvent::MoveRight),
        KeyCode::Backspace => Some(EditorEvent::Backspace),
        KeyCode::Enter => Some(EditorEvent::SplitLine),
        KeyCode::Esc => Some(EditorEvent::Exit),
        KeyCode::Char('s' | 'S') if ctrl => Some(EditorEvent::Save),
        // Terminals that send ^H for the backspace key.
        KeyCode::Char('h') if ctrl => Some(EditorEvent::Backspace),
        KeyCode::Char(c) if !ctrl && !alt => Some(EditorEvent::InsertChar(c)),
        _ => None,
    }
}
