//! Editable copies of history entries, created on first visit.

use crate::{
    history::{History, HistIdx},
    line::{EditLine, Line},
    undo::UndoableLine,
};

/// Tracks which history entry a session is showing, and keeps an
/// [`UndoableLine`] per visited entry so that edits to a recalled line
/// never touch the [`History`] itself.
///
/// Position `history.len()` is the line being entered. The line at the
/// current position is the one the caller holds as its active line; every
/// other visited line is parked here until navigated back to.
#[derive(Debug)]
pub struct HistoryLines {
    slots: Vec<Option<UndoableLine>>,
    position: usize,
    prefix: String,
}

impl HistoryLines {
    /// Start at the line being entered, one past the last entry.
    pub fn new(history: &History, prefix: impl Into<String>) -> Self {
        let mut slots = Vec::with_capacity(history.len() + 1);
        slots.resize_with(history.len() + 1, || None);
        Self { slots, position: history.len(), prefix: prefix.into() }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the active line is the one being entered rather than a
    /// recalled history entry.
    pub fn at_current_line(&self) -> bool {
        self.position + 1 == self.slots.len()
    }

    pub fn try_move_up(&mut self, history: &History, active: &mut UndoableLine) -> bool {
        match self.position.checked_sub(1) {
            Some(target) => self.swap_to(target, history, active),
            None => false,
        }
    }

    pub fn try_move_down(&mut self, history: &History, active: &mut UndoableLine) -> bool {
        self.swap_to(self.position + 1, history, active)
    }

    pub fn try_move_first(&mut self, history: &History, active: &mut UndoableLine) -> bool {
        self.swap_to(0, history, active)
    }

    /// Return to the line being entered.
    pub fn try_move_last(&mut self, history: &History, active: &mut UndoableLine) -> bool {
        self.swap_to(self.slots.len() - 1, history, active)
    }

    /// Park `active` at the current position and take the line at `target`
    /// in its place, materializing it from `history` on the first visit.
    fn swap_to(&mut self, target: usize, history: &History, active: &mut UndoableLine) -> bool {
        if target == self.position || target >= self.slots.len() {
            return false;
        }
        let incoming = match self.slots[target].take() {
            Some(line) => line,
            None => {
                let text = history.get(HistIdx(target)).unwrap_or_default();
                log::trace!("materializing history line {target}: {text:?}");
                UndoableLine::new(Line::new(self.prefix.as_str(), text, active.origin()))
            }
        };
        let outgoing = std::mem::replace(active, incoming);
        self.slots[self.position] = Some(outgoing);
        log::debug!("history position {} -> {target}", self.position);
        self.position = target;
        true
    }
}
