//! Keystroke to handler bindings.

use crate::{
    error::{LineBlockError, LineBlockResult},
    key::KeyPress,
    line_editor::EditorContext,
    terminal::Terminal,
};
use std::collections::HashMap;

/// What a handler did with a keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyOutcome<M> {
    /// The handler declined the key; it goes to the default handler next.
    NotConsumed,
    Consumed,
    /// Consumed, and the editor continues in mode `M`.
    SwitchTo(M),
    /// The session ends and yields its result.
    Finished,
    /// The session ends without a result.
    Aborted,
}

pub type KeyHandler<C> = fn(
    &mut C,
    &mut dyn Terminal,
    KeyPress,
) -> LineBlockResult<KeyOutcome<<C as EditorContext>::Mode>>;

/// Binds keystrokes to handlers over a context `C`, with one default
/// handler for every key that has no binding of its own.
pub struct KeyMap<C: EditorContext> {
    bindings: HashMap<KeyPress, KeyHandler<C>>,
    default: KeyHandler<C>,
}

impl<C: EditorContext> KeyMap<C> {
    pub fn new(default: KeyHandler<C>) -> Self {
        Self { bindings: HashMap::new(), default }
    }

    /// Bind `key` to `handler`. Binding a key twice is an error.
    pub fn bind(&mut self, key: KeyPress, handler: KeyHandler<C>) -> LineBlockResult<&mut Self> {
        if self.bindings.contains_key(&key) {
            return Err(LineBlockError::DuplicateBinding { key: key.to_string() });
        }
        self.bindings.insert(key, handler);
        Ok(self)
    }

    pub fn bind_all(
        &mut self,
        keys: impl IntoIterator<Item = KeyPress>,
        handler: KeyHandler<C>,
    ) -> LineBlockResult<&mut Self> {
        for key in keys {
            self.bind(key, handler)?;
        }
        Ok(self)
    }

    pub fn unbind(&mut self, key: KeyPress) -> Option<KeyHandler<C>> {
        self.bindings.remove(&key)
    }

    pub fn is_bound(&self, key: KeyPress) -> bool {
        self.bindings.contains_key(&key)
    }

    pub fn handler(&self, key: KeyPress) -> Option<KeyHandler<C>> {
        self.bindings.get(&key).copied()
    }

    pub fn default_handler(&self) -> KeyHandler<C> {
        self.default
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<C: EditorContext> std::fmt::Debug for KeyMap<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<String> = self.bindings.keys().map(KeyPress::to_string).collect();
        keys.sort();
        f.debug_struct("KeyMap").field("bindings", &keys).finish_non_exhaustive()
    }
}
