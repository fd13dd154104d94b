//! The `:` command line of the vi-style editor.

use crate::{
    error::LineBlockResult,
    handlers::{self, Outcome},
    key,
    key::KeyPress,
    keymap::{KeyMap, KeyOutcome},
    line::{EditLine, Line},
    line_editor::{EditorContext, LineEditor},
    terminal::{Coords, Terminal},
};

pub(crate) struct CommandContext {
    line: Line,
}

impl EditorContext for CommandContext {
    type Mode = ();

    fn line(&self) -> &dyn EditLine {
        &self.line
    }

    fn line_mut(&mut self) -> &mut dyn EditLine {
        &mut self.line
    }
}

/// Backspace on an empty command leaves the command line.
fn delete_or_leave(ctx: &mut CommandContext, term: &mut dyn Terminal, key: KeyPress) -> Outcome<CommandContext> {
    if ctx.line.is_empty() {
        return Ok(KeyOutcome::Aborted);
    }
    handlers::delete_before(ctx, term, key)
}

fn keymap() -> LineBlockResult<KeyMap<CommandContext>> {
    let mut keymap = KeyMap::<CommandContext>::new(handlers::insert_printable);
    keymap
        .bind(key!(@name Enter), handlers::finish)?
        .bind(key!(@name Esc), handlers::abort)?
        .bind(key!(@name Backspace), delete_or_leave)?
        .bind(key!(@name Delete), handlers::delete_after)?
        .bind(key!(@name Left), handlers::move_left)?
        .bind(key!(@name Right), handlers::move_right)?
        .bind(key!(@name Home), handlers::move_to_start)?
        .bind(key!(@name End), handlers::move_to_end)?;
    Ok(keymap)
}

/// Read a command at `origin`, erasing it from the screen afterwards.
/// Yields `None` when the user leaves the command line without Enter.
pub(crate) fn read_command(
    term: &mut dyn Terminal,
    prompt: &str,
    origin: Coords,
) -> LineBlockResult<Option<String>> {
    let mut ctx = CommandContext { line: Line::new(prompt, "", origin) };
    let command = LineEditor::new((), keymap()?).read_line(&mut ctx, term)?;
    ctx.line.close(term)?;
    Ok(command)
}
