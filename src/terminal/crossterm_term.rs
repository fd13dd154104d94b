//!

use crate::{
    error::LineBlockResult,
    key::KeyPress,
    terminal::{Coords, KeySource, Screen},
};
use crossterm::{
    cursor, queue, style, terminal,
    event::{self, Event, KeyEventKind},
    style::Color,
    terminal::ClearType,
};
use std::io::{Stdout, Write};

/// A [`Terminal`](super::Terminal) that draws to `sink` and reads keys from
/// the process's controlling terminal.
pub struct CrosstermTerminal<W: Write> {
    sink: W,
    foreground: Color,
}

impl Default for CrosstermTerminal<Stdout> {
    fn default() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> CrosstermTerminal<W> {
    pub fn new(sink: W) -> Self {
        Self { sink, foreground: Color::Reset }
    }

    pub fn sink(&mut self) -> &mut W {
        &mut self.sink
    }
}

/// Keeps the terminal in raw mode for as long as it lives.
struct RawMode;

impl RawMode {
    fn enable() -> LineBlockResult<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            log::warn!("failed to leave raw mode: {err}");
        }
    }
}

impl<W: Write> Screen for CrosstermTerminal<W> {
    fn width(&self) -> LineBlockResult<u16> {
        let (width, _height) = terminal::size()?;
        Ok(width)
    }

    fn cursor_position(&self) -> LineBlockResult<Coords> {
        let _raw = RawMode::enable()?;
        let (x, y) = cursor::position()?;
        Ok(Coords { x, y })
    }

    fn set_cursor(&mut self, pos: Coords) -> LineBlockResult<()> {
        let pos = pos.wrapped(self.width()?);
        queue!(self.sink, cursor::MoveTo(pos.x, pos.y))?;
        Ok(())
    }

    fn write_at(&mut self, pos: Coords, text: &str) -> LineBlockResult<()> {
        let pos = pos.wrapped(self.width()?);
        queue!(
            self.sink,
            cursor::MoveTo(pos.x, pos.y),
            style::Print(text),
        )?;
        Ok(())
    }

    fn clear_region_at(&mut self, pos: Coords, len: usize) -> LineBlockResult<()> {
        let pos = pos.wrapped(self.width()?);
        queue!(
            self.sink,
            cursor::MoveTo(pos.x, pos.y),
            style::Print(" ".repeat(len)),
            cursor::MoveTo(pos.x, pos.y),
        )?;
        Ok(())
    }

    fn clear(&mut self) -> LineBlockResult<()> {
        queue!(
            self.sink,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
        )?;
        Ok(())
    }

    fn foreground(&self) -> Color {
        self.foreground
    }

    fn set_foreground(&mut self, color: Color) -> LineBlockResult<()> {
        queue!(self.sink, style::SetForegroundColor(color))?;
        self.foreground = color;
        Ok(())
    }

    fn flush(&mut self) -> LineBlockResult<()> {
        self.sink.flush()?;
        Ok(())
    }
}

impl<W: Write> KeySource for CrosstermTerminal<W> {
    fn read_key(&mut self) -> LineBlockResult<KeyPress> {
        let _raw = RawMode::enable()?;
        loop {
            match event::read()? {
                Event::Key(event) if event.kind == KeyEventKind::Press => {
                    return Ok(KeyPress::from(event));
                }
                _event => {/* ignore the event */},
            }
        }
    }
}
