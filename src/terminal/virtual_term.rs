//! An in-memory terminal, for driving the editors without a tty.

use crate::{
    error::{LineBlockError, LineBlockResult},
    key::KeyPress,
    terminal::{Coords, KeySource, Screen},
};
use crossterm::style::Color;
use std::collections::VecDeque;
use unicode_segmentation::UnicodeSegmentation;

/// A grid of cells plus a scripted queue of keystrokes.
///
/// Reading a key after the script has run out fails with
/// [`LineBlockError::InputExhausted`].
#[derive(Clone, Debug)]
pub struct VirtualTerminal {
    width: u16,
    rows: Vec<Vec<String>>,
    cursor: Coords,
    foreground: Color,
    keys: VecDeque<KeyPress>,
}

impl VirtualTerminal {
    pub fn new(width: u16) -> Self {
        Self {
            width: width.max(1),
            rows: vec![],
            cursor: Coords::default(),
            foreground: Color::Reset,
            keys: VecDeque::new(),
        }
    }

    pub fn with_keys(mut self, keys: impl IntoIterator<Item = KeyPress>) -> Self {
        self.push_keys(keys);
        self
    }

    pub fn push_key(&mut self, key: KeyPress) {
        self.keys.push_back(key);
    }

    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = KeyPress>) {
        self.keys.extend(keys);
    }

    /// Script one plain keystroke per character of `text`.
    pub fn type_str(&mut self, text: &str) {
        self.keys.extend(text.chars().map(|c| crate::key!(c)));
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    /// The painted contents of row `y`, without trailing blanks.
    pub fn row(&self, y: u16) -> String {
        self.rows
            .get(usize::from(y))
            .map(|cells| cells.concat().trim_end().to_string())
            .unwrap_or_default()
    }

    pub fn cursor(&self) -> Coords {
        self.cursor
    }

    fn put(&mut self, grapheme: &str) {
        let (x, y) = (usize::from(self.cursor.x), usize::from(self.cursor.y));
        let width = usize::from(self.width);
        if self.rows.len() <= y {
            self.rows.resize_with(y + 1, Vec::new);
        }
        let row = &mut self.rows[y];
        if row.len() < width {
            row.resize(width, " ".to_string());
        }
        row[x] = grapheme.to_string();
        self.cursor = self.cursor.offset(1, self.width);
    }
}

impl Screen for VirtualTerminal {
    fn width(&self) -> LineBlockResult<u16> {
        Ok(self.width)
    }

    fn cursor_position(&self) -> LineBlockResult<Coords> {
        Ok(self.cursor)
    }

    fn set_cursor(&mut self, pos: Coords) -> LineBlockResult<()> {
        self.cursor = pos.wrapped(self.width);
        Ok(())
    }

    fn write_at(&mut self, pos: Coords, text: &str) -> LineBlockResult<()> {
        self.set_cursor(pos)?;
        for grapheme in text.graphemes(true) {
            self.put(grapheme);
        }
        Ok(())
    }

    fn clear_region_at(&mut self, pos: Coords, len: usize) -> LineBlockResult<()> {
        self.set_cursor(pos)?;
        for _ in 0..len {
            self.put(" ");
        }
        self.set_cursor(pos)
    }

    fn clear(&mut self) -> LineBlockResult<()> {
        self.rows.clear();
        self.cursor = Coords::default();
        Ok(())
    }

    fn foreground(&self) -> Color {
        self.foreground
    }

    fn set_foreground(&mut self, color: Color) -> LineBlockResult<()> {
        self.foreground = color;
        Ok(())
    }

    fn flush(&mut self) -> LineBlockResult<()> {
        Ok(())
    }
}

impl KeySource for VirtualTerminal {
    fn read_key(&mut self) -> LineBlockResult<KeyPress> {
        self.keys.pop_front().ok_or(LineBlockError::InputExhausted)
    }
}
