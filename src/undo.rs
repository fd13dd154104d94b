//! A [`Line`] that remembers every state it was edited from.

use crate::{
    error::LineBlockResult,
    line::{EditLine, InsertMode, Line},
    terminal::{Coords, Terminal},
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Snapshot {
    cursor: usize,
    text: String,
}

/// Wraps a [`Line`] and snapshots `(cursor, text)` before each edit or
/// cursor motion, so that any of them can be undone.
///
/// Painting the line is not an edit and leaves no snapshot.
#[derive(Clone, Debug, Default)]
pub struct UndoableLine {
    line: Line,
    snapshots: Vec<Snapshot>,
}

impl UndoableLine {
    pub fn new(line: Line) -> Self {
        Self { line, snapshots: vec![] }
    }

    pub fn inner(&self) -> &Line {
        &self.line
    }

    pub fn undo_depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Restore the state before the most recent edit.
    /// Does nothing when there is nothing to undo.
    pub fn undo(&mut self) {
        if let Some(snapshot) = self.snapshots.pop() {
            self.restore(snapshot);
        }
    }

    /// Restore the state before the first edit and forget all the others.
    pub fn undo_all(&mut self) {
        if !self.snapshots.is_empty() {
            let oldest = self.snapshots.swap_remove(0);
            self.snapshots.clear();
            self.restore(oldest);
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.line.set_text(&snapshot.text);
        self.line.set_cursor(snapshot.cursor);
    }

    fn record(&mut self) {
        self.snapshots.push(Snapshot {
            cursor: self.line.cursor(),
            text: self.line.text().to_string(),
        });
    }
}

impl From<Line> for UndoableLine {
    fn from(line: Line) -> Self {
        Self::new(line)
    }
}

impl EditLine for UndoableLine {
    fn text(&self) -> &str {
        self.line.text()
    }

    fn len(&self) -> usize {
        self.line.len()
    }

    fn cursor(&self) -> usize {
        self.line.cursor()
    }

    fn set_cursor(&mut self, pos: usize) {
        self.record();
        self.line.set_cursor(pos);
    }

    fn set_text(&mut self, text: &str) {
        self.record();
        self.line.set_text(text);
    }

    fn insert_mode(&self) -> InsertMode {
        self.line.insert_mode()
    }

    fn set_insert_mode(&mut self, mode: InsertMode) {
        self.line.set_insert_mode(mode);
    }

    fn preview(&self) -> &str {
        self.line.preview()
    }

    fn set_preview(&mut self, preview: &str) {
        self.line.set_preview(preview);
    }

    fn origin(&self) -> Coords {
        self.line.origin()
    }

    fn insert_str(&mut self, s: &str) {
        self.record();
        self.line.insert_str(s);
    }

    fn remove(&mut self, start: usize, count: usize) -> Option<String> {
        self.record();
        self.line.remove(start, count)
    }

    fn remove_before_cursor(&mut self) -> Option<String> {
        self.record();
        self.line.remove_before_cursor()
    }

    fn remove_after_cursor(&mut self) -> Option<String> {
        self.record();
        self.line.remove_after_cursor()
    }

    fn move_cursor_left(&mut self) {
        self.record();
        self.line.move_cursor_left();
    }

    fn move_cursor_right(&mut self) {
        self.record();
        self.line.move_cursor_right();
    }

    fn move_to_start(&mut self) {
        self.record();
        self.line.move_to_start();
    }

    fn move_to_end(&mut self) {
        self.record();
        self.line.move_to_end();
    }

    fn relocate(&mut self, origin: Coords) {
        self.line.relocate(origin);
    }

    fn render(&mut self, term: &mut dyn Terminal) -> LineBlockResult<()> {
        self.line.render(term)
    }

    fn close(&mut self, term: &mut dyn Terminal) -> LineBlockResult<()> {
        self.line.close(term)
    }
}
