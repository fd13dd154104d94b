//! The terminal collaborators of a line editor: a drawing surface and a
//! blocking source of keystrokes.

mod crossterm_term;
mod virtual_term;

pub use crossterm_term::CrosstermTerminal;
pub use virtual_term::VirtualTerminal;

use crate::{error::LineBlockResult, key::KeyPress};
use crossterm::style::Color;

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coords {
    pub x: u16,
    pub y: u16,
}

pub const ORIGIN: Coords = Coords { x: 0, y: 0 };

impl Coords {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Offset `cells` cells to the right of `self`, wrapping onto the
    /// following rows of a screen that is `width` cells wide.
    ///
    /// A column wraps as soon as it reaches `width`, so the result always
    /// lies on screen. The cell just past a full row is the first cell of
    /// the next row rather than a column beyond the right edge.
    pub fn offset(self, cells: usize, width: u16) -> Self {
        let width = usize::from(width.max(1));
        let mut column = usize::from(self.x) + cells;
        let mut row = usize::from(self.y);
        if column >= width {
            row += column / width;
            column %= width;
        }
        Self {
            x: saturating_u16(column),
            y: saturating_u16(row),
        }
    }

    /// `self`, wrapped onto the screen if its column lies past the edge.
    pub fn wrapped(self, width: u16) -> Self {
        self.offset(0, width)
    }
}

fn saturating_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl std::fmt::Display for Coords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The drawing surface a line is painted on.
pub trait Screen {
    /// The width of the screen, in cells.
    fn width(&self) -> LineBlockResult<u16>;

    fn cursor_position(&self) -> LineBlockResult<Coords>;

    /// Move the cursor. A column past the right edge wraps onto the
    /// following rows.
    fn set_cursor(&mut self, pos: Coords) -> LineBlockResult<()>;

    /// Write `text` starting at `pos`, wrapping at the right edge.
    fn write_at(&mut self, pos: Coords, text: &str) -> LineBlockResult<()>;

    fn write_char_at(&mut self, pos: Coords, c: char) -> LineBlockResult<()> {
        let mut buf = [0u8; 4];
        self.write_at(pos, c.encode_utf8(&mut buf))
    }

    /// Blank `len` cells starting at `pos`.
    fn clear_region_at(&mut self, pos: Coords, len: usize) -> LineBlockResult<()>;

    /// Blank the whole screen and home the cursor.
    fn clear(&mut self) -> LineBlockResult<()>;

    fn foreground(&self) -> Color;

    fn set_foreground(&mut self, color: Color) -> LineBlockResult<()>;

    /// Make everything drawn so far visible.
    fn flush(&mut self) -> LineBlockResult<()>;
}

/// A blocking source of keystrokes. Keys are never echoed.
pub trait KeySource {
    fn read_key(&mut self) -> LineBlockResult<KeyPress>;
}

pub trait Terminal: Screen + KeySource {}

impl<T: Screen + KeySource> Terminal for T {}
