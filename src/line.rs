//! The editable line buffer and the interface the editors edit through.

use crate::{
    error::LineBlockResult,
    terminal::{Coords, Terminal},
};
use crossterm::style::Color;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub enum InsertMode {
    #[default]
    Insert,
    Overwrite,
}

impl InsertMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Insert => Self::Overwrite,
            Self::Overwrite => Self::Insert,
        }
    }
}

/// An editable line of text with a cursor, painted on a terminal.
///
/// Positions are grapheme indices. The cursor always lies in
/// `0..=len()`; operations that would move it past an edge are no-ops.
pub trait EditLine {
    fn text(&self) -> &str;

    /// The length of the text, in graphemes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cursor(&self) -> usize;

    /// Move the cursor to `pos`. Positions past the end are ignored.
    fn set_cursor(&mut self, pos: usize);

    /// Replace the text, keeping the cursor when it still fits.
    fn set_text(&mut self, text: &str);

    fn insert_mode(&self) -> InsertMode;

    fn set_insert_mode(&mut self, mode: InsertMode);

    /// The non-editable suffix painted after the text.
    fn preview(&self) -> &str;

    fn set_preview(&mut self, preview: &str);

    /// The screen cell the line (its prefix included) starts at.
    fn origin(&self) -> Coords;

    fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Insert `s` at the cursor and advance the cursor past it. In
    /// overwrite mode the graphemes under the cursor are replaced.
    fn insert_str(&mut self, s: &str);

    /// Remove `count` graphemes starting at `start`, returning them.
    /// Returns `None` and changes nothing when the run extends past the end.
    fn remove(&mut self, start: usize, count: usize) -> Option<String>;

    fn remove_before_cursor(&mut self) -> Option<String>;

    fn remove_after_cursor(&mut self) -> Option<String>;

    fn move_cursor_left(&mut self);

    fn move_cursor_right(&mut self);

    fn move_to_start(&mut self);

    fn move_to_end(&mut self);

    /// Move the line to `origin` without painting it.
    fn relocate(&mut self, origin: Coords);

    /// Paint the prefix, the text and the preview, then place the cursor.
    fn render(&mut self, term: &mut dyn Terminal) -> LineBlockResult<()>;

    /// Erase everything the line painted and park the cursor at its origin.
    fn close(&mut self, term: &mut dyn Terminal) -> LineBlockResult<()>;

    /// Move the painted line to `origin` and repaint it there.
    fn set_position(&mut self, term: &mut dyn Terminal, origin: Coords) -> LineBlockResult<()> {
        self.close(term)?;
        self.relocate(origin);
        self.render(term)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    origin: Coords,
    prefix: String,
    text: String,
    cursor: usize,
    mode: InsertMode,
    preview: String,
    /// The number of cells covered by the last render
    painted: usize,
}

impl Line {
    /// A line showing `prefix` at `origin`, with the cursor after `text`.
    pub fn new(prefix: impl Into<String>, text: impl Into<String>, origin: Coords) -> Self {
        let text = text.into();
        let cursor = text.graphemes(true).count();
        Self {
            origin,
            prefix: prefix.into(),
            text,
            cursor,
            mode: InsertMode::default(),
            preview: String::new(),
            painted: 0,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Where the grapheme at `index` is painted on a screen `width` cells
    /// wide. Index `len()` is the cell just past the text.
    pub fn screen_position(&self, index: usize, width: u16) -> Coords {
        self.origin.offset(self.prefix_len() + index, width)
    }

    fn prefix_len(&self) -> usize {
        self.prefix.graphemes(true).count()
    }

    fn footprint(&self) -> usize {
        self.prefix_len() + self.len() + self.preview.graphemes(true).count()
    }

    /// The byte offset of grapheme `index`; `index == len()` maps to the
    /// end of the text.
    fn byte_offset(&self, index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn splice(&mut self, at: usize, s: &str) {
        let offset = self.byte_offset(at);
        self.text.insert_str(offset, s);
    }
}

impl EditLine for Line {
    fn text(&self) -> &str {
        &self.text
    }

    fn len(&self) -> usize {
        self.text.graphemes(true).count()
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_cursor(&mut self, pos: usize) {
        if pos <= self.len() {
            self.cursor = pos;
        }
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.cursor.min(self.len());
    }

    fn insert_mode(&self) -> InsertMode {
        self.mode
    }

    fn set_insert_mode(&mut self, mode: InsertMode) {
        self.mode = mode;
    }

    fn preview(&self) -> &str {
        &self.preview
    }

    fn set_preview(&mut self, preview: &str) {
        self.preview = preview.to_string();
    }

    fn origin(&self) -> Coords {
        self.origin
    }

    fn insert_str(&mut self, s: &str) {
        let inserted = s.graphemes(true).count();
        if inserted == 0 {
            return;
        }
        let len = self.len();
        let start = self.byte_offset(self.cursor);
        if self.cursor < len && self.mode == InsertMode::Overwrite {
            let replaced = inserted.min(len - self.cursor);
            let end = self.byte_offset(self.cursor + replaced);
            self.text.replace_range(start..end, s);
        } else {
            self.splice(self.cursor, s);
        }
        // Inserted text may merge with the grapheme before it, e.g. a combining mark.
        let end = start + s.len();
        self.cursor = self.text[..end].graphemes(true).count().min(self.len());
    }

    fn remove(&mut self, start: usize, count: usize) -> Option<String> {
        if start + count > self.len() {
            return None;
        }
        let from = self.byte_offset(start);
        let to = self.byte_offset(start + count);
        let removed: String = self.text.drain(from..to).collect();
        if self.cursor > start + count {
            self.cursor -= count;
        } else if self.cursor > start {
            self.cursor = start;
        }
        Some(removed)
    }

    fn remove_before_cursor(&mut self) -> Option<String> {
        let start = self.cursor.checked_sub(1)?;
        self.remove(start, 1)
    }

    fn remove_after_cursor(&mut self) -> Option<String> {
        self.remove(self.cursor, 1)
    }

    fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    fn move_to_end(&mut self) {
        self.cursor = self.len();
    }

    fn relocate(&mut self, origin: Coords) {
        self.origin = origin;
        self.painted = 0;
    }

    fn render(&mut self, term: &mut dyn Terminal) -> LineBlockResult<()> {
        let width = term.width()?;
        term.write_at(self.origin, &self.prefix)?;
        term.write_at(self.screen_position(0, width), &self.text)?;
        if !self.preview.is_empty() {
            let foreground = term.foreground();
            term.set_foreground(Color::DarkGrey)?;
            term.write_at(self.screen_position(self.len(), width), &self.preview)?;
            term.set_foreground(foreground)?;
        }
        let footprint = self.footprint();
        if self.painted > footprint {
            let stale = self.origin.offset(footprint, width);
            term.clear_region_at(stale, self.painted - footprint)?;
        }
        self.painted = footprint;
        term.set_cursor(self.screen_position(self.cursor, width))
    }

    fn close(&mut self, term: &mut dyn Terminal) -> LineBlockResult<()> {
        if self.painted > 0 {
            term.clear_region_at(self.origin, self.painted)?;
            self.painted = 0;
        }
        term.set_cursor(self.origin)
    }
}
