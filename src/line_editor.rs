//! The read loop shared by every editor.

use crate::{
    error::{LineBlockError, LineBlockResult},
    key::KeyPress,
    keymap::{KeyMap, KeyOutcome},
    line::EditLine,
    terminal::Terminal,
};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// The state an editor's handlers work on.
pub trait EditorContext: Sized {
    /// The modes the editor switches between, each with its own key map.
    type Mode: Copy + Eq + Hash + Debug;

    fn line(&self) -> &dyn EditLine;

    fn line_mut(&mut self) -> &mut dyn EditLine;

    /// The value a finished session yields.
    fn result(&self) -> Option<String> {
        Some(self.line().text().to_string())
    }

    /// Sees every keystroke before the key map does. Returning `Some`
    /// settles the keystroke without consulting the key map.
    fn intercept(
        &mut self,
        _term: &mut dyn Terminal,
        _key: KeyPress,
    ) -> LineBlockResult<Option<KeyOutcome<Self::Mode>>> {
        Ok(None)
    }
}

enum Step {
    Continue,
    Finished,
    Aborted,
}

/// Reads keystrokes and dispatches them through the key map of the
/// current mode until a handler finishes or aborts the session.
pub struct LineEditor<C: EditorContext> {
    keymaps: HashMap<C::Mode, KeyMap<C>>,
    initial: C::Mode,
    mode: C::Mode,
}

impl<C: EditorContext> LineEditor<C> {
    /// An editor that starts every session in `initial`, using `keymap`.
    pub fn new(initial: C::Mode, keymap: KeyMap<C>) -> Self {
        let mut keymaps = HashMap::new();
        keymaps.insert(initial, keymap);
        Self { keymaps, initial, mode: initial }
    }

    pub fn with_mode(mut self, mode: C::Mode, keymap: KeyMap<C>) -> Self {
        self.keymaps.insert(mode, keymap);
        self
    }

    /// Fail with [`LineBlockError::MissingKeyMap`] unless every one of
    /// `modes` has a key map. Editors call this once they are assembled,
    /// before any handler gets the chance to switch to a missing mode.
    pub fn require_modes(&self, modes: impl IntoIterator<Item = C::Mode>) -> LineBlockResult<()> {
        match modes.into_iter().find(|mode| !self.keymaps.contains_key(mode)) {
            Some(mode) => Err(LineBlockError::MissingKeyMap { mode: format!("{mode:?}") }),
            None => Ok(()),
        }
    }

    pub fn mode(&self) -> C::Mode {
        self.mode
    }

    pub fn keymap_mut(&mut self, mode: C::Mode) -> Option<&mut KeyMap<C>> {
        self.keymaps.get_mut(&mode)
    }

    /// Run one session: paint the line, then handle keystrokes until a
    /// handler returns [`KeyOutcome::Finished`] (yielding the context's
    /// result) or [`KeyOutcome::Aborted`] (yielding `None`).
    pub fn read_line(
        &mut self,
        ctx: &mut C,
        term: &mut dyn Terminal,
    ) -> LineBlockResult<Option<String>> {
        self.mode = self.initial;
        log::debug!("line session started in {:?} mode", self.mode);
        ctx.line_mut().render(term)?;
        term.flush()?;
        loop {
            let key = term.read_key()?;
            match self.dispatch(ctx, term, key)? {
                Step::Continue => {
                    ctx.line_mut().render(term)?;
                    term.flush()?;
                }
                Step::Finished => {
                    let result = ctx.result();
                    log::debug!("line session finished: {result:?}");
                    return Ok(result);
                }
                Step::Aborted => {
                    log::debug!("line session aborted");
                    return Ok(None);
                }
            }
        }
    }

    fn dispatch(&mut self, ctx: &mut C, term: &mut dyn Terminal, key: KeyPress) -> LineBlockResult<Step> {
        if let Some(outcome) = ctx.intercept(term, key)? {
            log::trace!("{key} intercepted: {outcome:?}");
            return self.apply(outcome);
        }
        let keymap = self.keymaps
            .get(&self.mode)
            .ok_or_else(|| LineBlockError::MissingKeyMap { mode: format!("{:?}", self.mode) })?;
        let (bound, default) = (keymap.handler(key), keymap.default_handler());
        let mut outcome = match bound {
            Some(handler) => handler(ctx, term, key)?,
            None => KeyOutcome::NotConsumed,
        };
        if outcome == KeyOutcome::NotConsumed {
            outcome = default(ctx, term, key)?;
        }
        log::trace!("{key} in {:?} mode: {outcome:?}", self.mode);
        self.apply(outcome)
    }

    fn apply(&mut self, outcome: KeyOutcome<C::Mode>) -> LineBlockResult<Step> {
        match outcome {
            KeyOutcome::NotConsumed | KeyOutcome::Consumed => Ok(Step::Continue),
            KeyOutcome::SwitchTo(mode) => {
                if !self.keymaps.contains_key(&mode) {
                    return Err(LineBlockError::MissingKeyMap { mode: format!("{mode:?}") });
                }
                log::debug!("switching from {:?} to {mode:?} mode", self.mode);
                self.mode = mode;
                Ok(Step::Continue)
            }
            KeyOutcome::Finished => Ok(Step::Finished),
            KeyOutcome::Aborted => Ok(Step::Aborted),
        }
    }
}

impl<C: EditorContext> std::fmt::Debug for LineEditor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditor")
            .field("keymaps", &self.keymaps)
            .field("mode", &self.mode)
            .finish()
    }
}
