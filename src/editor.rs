//! The surface a host application drives an editor through.

use crate::error::LineBlockResult;

pub trait ConsoleEditor {
    /// Let the user edit one line. Yields `None` when the session is
    /// aborted rather than finished.
    fn read_line(&mut self) -> LineBlockResult<Option<String>>;

    /// Erase the line from the screen.
    fn close(&mut self) -> LineBlockResult<()>;

    /// The committed lines, oldest first.
    fn history(&self) -> Vec<String>;

    /// Replace every committed line.
    fn set_history(&mut self, entries: Vec<String>);

    /// The text of the active line.
    fn text(&self) -> String;

    /// Replace the text of the active line and move the cursor to its
    /// end. The next session starts out with this text.
    fn set_text(&mut self, text: &str);

    fn preview(&self) -> String;

    /// Show `preview` after the text, in this and later sessions.
    fn set_preview(&mut self, preview: &str);
}
