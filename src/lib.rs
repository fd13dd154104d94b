//!

pub mod bounds;
pub mod clipboard;
pub mod editor;
mod error;
mod handlers;
pub mod history;
pub mod history_lines;
pub mod key;
pub mod keymap;
pub mod line;
pub mod line_editor;
mod macros;
pub mod readline;
mod session;
pub mod terminal;
pub mod trie;
pub mod undo;
pub mod vi;

pub use error::{LineBlockError, LineBlockResult};

pub mod prelude {
    pub use camino::{Utf8Path, Utf8PathBuf};
    pub use crate::{
        clipboard::Clipboard,
        editor::ConsoleEditor,
        error::{LineBlockError, LineBlockResult},
        history::History,
        key::KeyPress,
        readline::{ReadLineEditor, ReadLineEditorBuilder},
        terminal::{CrosstermTerminal, Terminal, VirtualTerminal},
        trie::PrefixTrie,
        vi::{ViLineEditor, ViLineEditorBuilder, ViMode},
    };
    pub use crossterm::style::{Color, Stylize};
}
