//! State shared by the emacs- and vi-style editors across sessions.

use crate::{
    clipboard::Clipboard,
    error::LineBlockResult,
    history::History,
    history_lines::HistoryLines,
    line::{EditLine, Line},
    line_editor::EditorContext,
    terminal::{Coords, Terminal, ORIGIN},
    undo::UndoableLine,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Navigation {
    Up,
    Down,
    First,
    Last,
}

/// The active line of an editor together with the history it commits
/// to and the clipboard it cuts to.
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) line: UndoableLine,
    pub(crate) history: History,
    pub(crate) lines: HistoryLines,
    pub(crate) clipboard: Clipboard,
    prompt: String,
}

impl Session {
    pub(crate) fn new(prompt: &str, text: &str, history: History, clipboard: Clipboard) -> Self {
        Self {
            line: UndoableLine::new(Line::new(prompt, text, ORIGIN)),
            lines: HistoryLines::new(&history, prompt),
            history,
            clipboard,
            prompt: prompt.to_string(),
        }
    }

    /// Start a new session at `origin` with a fresh line holding `text`.
    pub(crate) fn begin(&mut self, origin: Coords, text: &str, preview: &str) {
        let mut line = Line::new(self.prompt.as_str(), text, origin);
        line.set_preview(preview);
        self.line = UndoableLine::new(line);
        self.lines = HistoryLines::new(&self.history, self.prompt.as_str());
    }

    /// Append the active line to the history.
    pub(crate) fn commit(&mut self) {
        log::debug!("committing {:?} to history", self.line.text());
        self.history.append_entry(self.line.text());
    }

    /// Swap the active line for the one at another history position,
    /// painting it where the old one was.
    pub(crate) fn navigate(&mut self, term: &mut dyn Terminal, nav: Navigation) -> LineBlockResult<bool> {
        let origin = self.line.origin();
        self.line.close(term)?;
        let (history, line) = (&self.history, &mut self.line);
        let moved = match nav {
            Navigation::Up => self.lines.try_move_up(history, line),
            Navigation::Down => self.lines.try_move_down(history, line),
            Navigation::First => self.lines.try_move_first(history, line),
            Navigation::Last => self.lines.try_move_last(history, line),
        };
        self.line.relocate(origin);
        Ok(moved)
    }

    /// Remove a run of the active line, keeping it on the clipboard when
    /// it is not empty.
    pub(crate) fn cut(&mut self, start: usize, count: usize) -> Option<String> {
        let removed = self.line.remove(start, count)?;
        if !removed.is_empty() {
            self.clipboard.set_text(removed.as_str());
        }
        Some(removed)
    }

    pub(crate) fn paste(&mut self) -> bool {
        match self.clipboard.text() {
            Some(text) => {
                self.line.insert_str(&text);
                true
            }
            None => false,
        }
    }
}

/// A context built around a [`Session`].
pub(crate) trait SessionContext: EditorContext {
    fn session(&mut self) -> &mut Session;
}
