//!

use serde_json::Error as SerdeJsonError;

pub type LineBlockResult<T> = std::result::Result<T, LineBlockError>;

#[derive(Debug, displaydoc::Display, derive_more::From)]
pub enum LineBlockError {
    /// I/O error: {0}
    Io(std::io::Error),
    /// Camino path conversion error: {0}
    Camino(camino::FromPathBufError),
    /// SerdeJsonError: {0}
    SerdeJson(SerdeJsonError),
    /// The key {key} is already bound in this key map
    #[from(ignore)]
    DuplicateBinding { key: String },
    /// No key map was registered for mode {mode}
    #[from(ignore)]
    MissingKeyMap { mode: String },
    /// The key source has no more keystrokes
    #[from(ignore)]
    InputExhausted,
}

impl std::error::Error for LineBlockError {}
