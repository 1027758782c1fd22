use crate::document::{Document, Result};

use super::{Cursor, EditorEvent};

/// What the session should do after an event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Keep editing.
    Continue,
    /// The document was written to its file; keep editing.
    Saved,
    /// Leave the editing session.
    Exit,
}

/// Applies editing events to a document at a cursor position.
///
/// The cursor starts at `(0, 0)` for every new editor. Row is always a valid
/// line index. Column is clamped by horizontal moves and edits but left alone
/// by vertical moves.
pub struct CursorEditor<'doc> {
    document: &'doc mut Document,
    cursor: Cursor,
}

impl<'doc> CursorEditor<'doc> {
    /// Start editing `document` with the cursor at the origin.
    pub fn new(document: &'doc mut Document) -> Self {
        if document.buffer().is_empty() {
            // Documents from this crate always have a line; keep the row
            // invariant for any that do not.
            let _ = document.buffer_mut().ensure_line_at(0);
        }
        Self {
            document,
            cursor: Cursor::new(),
        }
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn document(&self) -> &Document {
        self.document
    }

    /// Apply one event.
    ///
    /// # Errors
    ///
    /// Returns the buffer error of an edit or save that was refused. The
    /// document and cursor are unchanged in that case and editing can go on.
    pub fn handle(&mut self, event: EditorEvent) -> Result<Step> {
        match event {
            EditorEvent::MoveUp => self.move_up(),
            EditorEvent::MoveDown => self.move_down(),
            EditorEvent::MoveLeft => self.move_left(),
            EditorEvent::MoveRight => self.move_right(),
            EditorEvent::InsertChar(ch) => self.insert_char(ch)?,
            EditorEvent::Backspace => self.backspace(),
            EditorEvent::SplitLine => self.split_line()?,
            EditorEvent::Save => {
                self.document.save()?;
                return Ok(Step::Saved);
            }
            EditorEvent::Exit => return Ok(Step::Exit),
        }
        Ok(Step::Continue)
    }

    /// Insert `ch` at the cursor.
    ///
    /// A cursor past the end of the line first pads the line with spaces up
    /// to the cursor. Characters outside printable ASCII are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::CapacityExceeded`](crate::document::BufferError::CapacityExceeded)
    /// if the cursor row cannot be materialised under the line limit.
    pub fn insert_char(&mut self, ch: char) -> Result<()> {
        let Some(byte) = printable_byte(ch) else {
            tracing::debug!(?ch, "ignoring non-printable input");
            return Ok(());
        };
        let Cursor { row, col } = self.cursor;

        let buffer = self.document.buffer_mut();
        buffer.ensure_line_at(row)?;
        let line = buffer.line_mut(row);
        line.pad_to(col);
        line.insert(col, byte);

        self.cursor.col = col + 1;
        self.document.mark_dirty();
        Ok(())
    }

    /// Delete the character before the cursor.
    ///
    /// Does nothing at column 0; lines are never joined. Past the end of the
    /// line there is nothing to delete, so only the cursor steps left.
    pub fn backspace(&mut self) {
        let Cursor { row, col } = self.cursor;
        if col == 0 {
            return;
        }
        if col <= self.document.buffer().line_len(row) {
            self.document.buffer_mut().line_mut(row).remove(col - 1);
            self.document.mark_dirty();
        }
        self.cursor.col = col - 1;
    }

    /// Break the current line at the cursor.
    ///
    /// The text after the cursor moves to a new line inserted below, and the
    /// cursor goes to the start of that line.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::CapacityExceeded`](crate::document::BufferError::CapacityExceeded)
    /// when the buffer is full; nothing is split.
    pub fn split_line(&mut self) -> Result<()> {
        let Cursor { row, col } = self.cursor;

        let buffer = self.document.buffer_mut();
        let tail = buffer.line(row).tail(col);
        buffer.insert_line(row + 1, tail)?;
        buffer.line_mut(row).truncate(col);

        self.cursor = Cursor::at(row + 1, 0);
        self.document.mark_dirty();
        Ok(())
    }

    fn move_up(&mut self) {
        self.cursor.row = self.cursor.row.saturating_sub(1);
    }

    fn move_down(&mut self) {
        let last = self.document.buffer().line_count().saturating_sub(1);
        self.cursor.row = (self.cursor.row + 1).min(last);
    }

    fn move_left(&mut self) {
        self.cursor.col = self.cursor.col.saturating_sub(1);
    }

    fn move_right(&mut self) {
        let len = self.document.buffer().line_len(self.cursor.row);
        self.cursor.col = (self.cursor.col + 1).min(len);
    }
}

impl std::fmt::Debug for CursorEditor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorEditor")
            .field("document", &self.document.display_name())
            .field("lines", &self.document.buffer().line_count())
            .field("cursor", &self.cursor)
            .finish()
    }
}

/// The byte for `ch` if it is printable ASCII (space through `~`).
fn printable_byte(ch: char) -> Option<u8> {
    u8::try_from(ch)
        .ok()
        .filter(|b| b.is_ascii_graphic() || *b == b' ')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BufferError, DEFAULT_MAX_LINES};
    use crate::editor::EditorEvent::{
        Backspace, Exit, InsertChar, MoveDown, MoveLeft, MoveRight, MoveUp, Save, SplitLine,
    };

    fn doc(text: &str) -> Document {
        let mut doc = Document::scratch(DEFAULT_MAX_LINES);
        let buffer = doc.buffer_mut();
        buffer.load_from(text.as_bytes()).unwrap();
        doc
    }

    fn texts(editor: &CursorEditor<'_>) -> Vec<String> {
        editor
            .document()
            .buffer()
            .lines()
            .map(|l| l.text().into_owned())
            .collect()
    }

    fn run(editor: &mut CursorEditor<'_>, events: &[EditorEvent]) {
        for event in events {
            editor.handle(*event).unwrap();
        }
    }

    fn move_to(editor: &mut CursorEditor<'_>, row: usize, col: usize) {
        for _ in 0..row {
            editor.handle(MoveDown).unwrap();
        }
        for _ in 0..col {
            editor.handle(MoveRight).unwrap();
        }
        assert_eq!(editor.cursor(), Cursor::at(row, col));
    }

    // --- Session start ---

    #[test]
    fn test_cursor_starts_at_origin() {
        let mut doc = doc("hello\nworld");
        let editor = CursorEditor::new(&mut doc);
        assert_eq!(editor.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_fresh_document_is_clean() {
        let mut doc = doc("hello");
        let editor = CursorEditor::new(&mut doc);
        assert!(!editor.document().is_dirty());
    }

    // --- Vertical movement ---

    #[test]
    fn test_move_up_at_first_line_is_noop() {
        let mut doc = doc("hello\nworld");
        let mut editor = CursorEditor::new(&mut doc);
        editor.handle(MoveUp).unwrap();
        assert_eq!(editor.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_move_down_at_last_line_is_noop() {
        let mut doc = doc("hello\nworld");
        let mut editor = CursorEditor::new(&mut doc);
        run(&mut editor, &[MoveDown, MoveDown, MoveDown]);
        assert_eq!(editor.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_vertical_move_keeps_column_past_shorter_line() {
        let mut doc = doc("hi\nhello");
        let mut editor = CursorEditor::new(&mut doc);
        move_to(&mut editor, 1, 4);
        editor.handle(MoveUp).unwrap();
        assert_eq!(editor.cursor(), Cursor::at(0, 4));
    }

    // --- Horizontal movement ---

    #[test]
    fn test_move_left_at_start_is_noop() {
        let mut doc = doc("hello");
        let mut editor = CursorEditor::new(&mut doc);
        editor.handle(MoveLeft).unwrap();
        assert_eq!(editor.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_move_right_at_end_is_noop() {
        let mut doc = doc("abc");
        let mut editor = CursorEditor::new(&mut doc);
        run(&mut editor, &[MoveRight, MoveRight, MoveRight, MoveRight]);
        assert_eq!(editor.cursor(), Cursor::at(0, 3));
    }

    #[test]
    fn test_move_right_does_not_wrap() {
        let mut doc = doc("ab\ncd");
        let mut editor = CursorEditor::new(&mut doc);
        run(&mut editor, &[MoveRight, MoveRight, MoveRight]);
        assert_eq!(editor.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_move_right_past_end_clamps_to_line_length() {
        let mut doc = doc("hi\nhello");
        let mut editor = CursorEditor::new(&mut doc);
        move_to(&mut editor, 1, 5);
        run(&mut editor, &[MoveUp, MoveRight]);
        assert_eq!(editor.cursor(), Cursor::at(0, 2));
    }

    // --- Insertion ---

    #[test]
    fn test_insert_char_in_middle() {
        let mut doc = doc("hllo");
        let mut editor = CursorEditor::new(&mut doc);
        run(&mut editor, &[MoveRight, InsertChar('e')]);
        assert_eq!(texts(&editor), vec!["hello"]);
        assert_eq!(editor.cursor(), Cursor::at(0, 2));
        assert!(editor.document().is_dirty());
    }

    #[test]
    fn test_insert_past_end_pads_with_spaces() {
        let mut doc = doc("abc\nhello");
        let mut editor = CursorEditor::new(&mut doc);
        move_to(&mut editor, 1, 5);
        run(&mut editor, &[MoveUp, InsertChar('x')]);
        assert_eq!(texts(&editor), vec!["abc  x", "hello"]);
        assert_eq!(editor.cursor(), Cursor::at(0, 6));
    }

    #[test]
    fn test_insert_non_printable_is_ignored() {
        let mut doc = doc("abc");
        let mut editor = CursorEditor::new(&mut doc);
        run(&mut editor, &[InsertChar('\t'), InsertChar('é'), InsertChar('\u{7f}')]);
        assert_eq!(texts(&editor), vec!["abc"]);
        assert_eq!(editor.cursor(), Cursor::at(0, 0));
        assert!(!editor.document().is_dirty());
    }

    #[test]
    fn test_insert_space_is_printable() {
        let mut doc = doc("ab");
        let mut editor = CursorEditor::new(&mut doc);
        run(&mut editor, &[MoveRight, InsertChar(' ')]);
        assert_eq!(texts(&editor), vec!["a b"]);
    }

    // --- Backspace ---

    #[test]
    fn test_backspace_at_column_zero_is_noop() {
        let mut doc = doc("hello\nworld");
        let mut editor = CursorEditor::new(&mut doc);
        run(&mut editor, &[MoveDown, Backspace]);
        assert_eq!(texts(&editor), vec!["hello", "world"]);
        assert_eq!(editor.cursor(), Cursor::at(1, 0));
        assert!(!editor.document().is_dirty());
    }

    #[test]
    fn test_backspace_removes_previous_char() {
        let mut doc = doc("hello");
        let mut editor = CursorEditor::new(&mut doc);
        move_to(&mut editor, 0, 3);
        editor.handle(Backspace).unwrap();
        assert_eq!(texts(&editor), vec!["helo"]);
        assert_eq!(editor.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_backspace_past_end_only_moves_cursor() {
        let mut doc = doc("ab\nhello");
        let mut editor = CursorEditor::new(&mut doc);
        move_to(&mut editor, 1, 5);
        run(&mut editor, &[MoveUp, Backspace]);
        assert_eq!(texts(&editor), vec!["ab", "hello"]);
        assert_eq!(editor.cursor(), Cursor::at(0, 4));

        run(&mut editor, &[Backspace, Backspace, Backspace]);
        assert_eq!(texts(&editor), vec!["a", "hello"]);
        assert_eq!(editor.cursor(), Cursor::at(0, 1));
    }

    // --- Split ---

    #[test]
    fn test_split_line_in_middle() {
        let mut doc = doc("hello world");
        let mut editor = CursorEditor::new(&mut doc);
        move_to(&mut editor, 0, 5);
        editor.handle(SplitLine).unwrap();
        assert_eq!(texts(&editor), vec!["hello", " world"]);
        assert_eq!(editor.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_split_line_shifts_following_lines() {
        let mut doc = doc("one\ntwo\nthree");
        let mut editor = CursorEditor::new(&mut doc);
        move_to(&mut editor, 1, 1);
        editor.handle(SplitLine).unwrap();
        assert_eq!(texts(&editor), vec!["one", "t", "wo", "three"]);
        assert_eq!(editor.cursor(), Cursor::at(2, 0));
    }

    #[test]
    fn test_split_line_at_start_and_end() {
        let mut doc = doc("abc");
        let mut editor = CursorEditor::new(&mut doc);
        editor.handle(SplitLine).unwrap();
        assert_eq!(texts(&editor), vec!["", "abc"]);
        assert_eq!(editor.cursor(), Cursor::at(1, 0));

        run(&mut editor, &[MoveRight, MoveRight, MoveRight, SplitLine]);
        assert_eq!(texts(&editor), vec!["", "abc", ""]);
        assert_eq!(editor.cursor(), Cursor::at(2, 0));
    }

    #[test]
    fn test_split_past_end_inserts_empty_line() {
        let mut doc = doc("ab\nhello");
        let mut editor = CursorEditor::new(&mut doc);
        move_to(&mut editor, 1, 5);
        run(&mut editor, &[MoveUp, SplitLine]);
        assert_eq!(texts(&editor), vec!["ab", "", "hello"]);
    }

    #[test]
    fn test_split_when_full_is_refused() {
        let mut doc = Document::scratch(2);
        doc.buffer_mut().load_from(&b"ab\ncd"[..]).unwrap();
        let mut editor = CursorEditor::new(&mut doc);
        editor.handle(MoveRight).unwrap();

        let err = editor.handle(SplitLine).unwrap_err();
        assert!(matches!(err, BufferError::CapacityExceeded { max: 2 }));
        assert_eq!(texts(&editor), vec!["ab", "cd"]);
        assert_eq!(editor.cursor(), Cursor::at(0, 1));
    }

    // --- Save and exit ---

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut doc = Document::create(&path, DEFAULT_MAX_LINES).unwrap();
        let mut editor = CursorEditor::new(&mut doc);
        run(&mut editor, &[InsertChar('h'), InsertChar('i'), SplitLine]);

        assert_eq!(editor.handle(Save).unwrap(), Step::Saved);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hi\n\n");
        assert!(!editor.document().is_dirty());
    }

    #[test]
    fn test_save_scratch_reports_error_and_keeps_content() {
        let mut doc = doc("keep");
        let mut editor = CursorEditor::new(&mut doc);
        let err = editor.handle(Save).unwrap_err();
        assert!(matches!(err, BufferError::NoFileAssociated));
        assert_eq!(texts(&editor), vec!["keep"]);
    }

    #[test]
    fn test_exit_returns_exit_step() {
        let mut doc = doc("hello");
        let mut editor = CursorEditor::new(&mut doc);
        assert_eq!(editor.handle(Exit).unwrap(), Step::Exit);
        assert_eq!(editor.handle(MoveRight).unwrap(), Step::Continue);
    }

    // --- Complex editing sequences ---

    #[test]
    fn test_type_then_backspace_then_type() {
        let mut doc = Document::scratch(DEFAULT_MAX_LINES);
        let mut editor = CursorEditor::new(&mut doc);
        run(
            &mut editor,
            &[
                InsertChar('h'),
                InsertChar('e'),
                InsertChar('l'),
                Backspace,
                InsertChar('l'),
                InsertChar('p'),
            ],
        );
        assert_eq!(texts(&editor), vec!["help"]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn any_event() -> impl Strategy<Value = EditorEvent> {
            prop_oneof![
                Just(MoveUp),
                Just(MoveDown),
                Just(MoveLeft),
                Just(MoveRight),
                Just(Backspace),
                Just(SplitLine),
                proptest::char::range(' ', '~').prop_map(InsertChar),
            ]
        }

        proptest! {
            #[test]
            fn prop_cursor_stays_in_bounds(
                events in proptest::collection::vec(any_event(), 0..200)
            ) {
                let mut doc = doc("alpha\nbe\n\ngamma delta");
                let mut editor = CursorEditor::new(&mut doc);
                for event in events {
                    let before = editor.cursor();
                    let within_before =
                        before.col <= editor.document().buffer().line_len(before.row);
                    let applied = editor.handle(event).is_ok();

                    let count = editor.document().buffer().line_count();
                    prop_assert!(count >= 1);
                    let Cursor { row, col } = editor.cursor();
                    prop_assert!(row < count);

                    let len = editor.document().buffer().line_len(row);
                    match event {
                        MoveUp | MoveDown => prop_assert_eq!(col, before.col),
                        MoveRight | InsertChar(_) | SplitLine if applied => {
                            prop_assert!(col <= len, "{event:?} left col {col} past len {len}");
                        }
                        _ if within_before => {
                            prop_assert!(col <= len, "{event:?} left col {col} past len {len}");
                        }
                        _ => {}
                    }
                }
            }

            #[test]
            fn prop_horizontal_moves_clamp_column(
                moves in proptest::collection::vec(prop_oneof![Just(MoveLeft), Just(MoveRight)], 0..60)
            ) {
                let mut doc = doc("hello world");
                let mut editor = CursorEditor::new(&mut doc);
                for event in moves {
                    editor.handle(event).unwrap();
                    prop_assert!(editor.cursor().col <= 11);
                }
            }
        }
    }
}
