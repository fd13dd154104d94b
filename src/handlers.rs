//! Key handlers shared between editors.

use crate::{
    bounds,
    error::LineBlockResult,
    key::KeyPress,
    keymap::KeyOutcome,
    line::EditLine,
    line_editor::EditorContext,
    session::{Navigation, SessionContext},
    terminal::{Terminal, ORIGIN},
};

pub(crate) type Outcome<C> = LineBlockResult<KeyOutcome<<C as EditorContext>::Mode>>;

pub(crate) fn insert_printable<C: EditorContext>(ctx: &mut C, _: &mut dyn Terminal, key: KeyPress) -> Outcome<C> {
    match key.printable() {
        Some(c) => {
            ctx.line_mut().insert_char(c);
            Ok(KeyOutcome::Consumed)
        }
        None => Ok(KeyOutcome::NotConsumed),
    }
}

pub(crate) fn move_left<C: EditorContext>(ctx: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.line_mut().move_cursor_left();
    Ok(KeyOutcome::Consumed)
}

pub(crate) fn move_right<C: EditorContext>(ctx: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.line_mut().move_cursor_right();
    Ok(KeyOutcome::Consumed)
}

pub(crate) fn move_to_start<C: EditorContext>(ctx: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.line_mut().move_to_start();
    Ok(KeyOutcome::Consumed)
}

pub(crate) fn move_to_end<C: EditorContext>(ctx: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.line_mut().move_to_end();
    Ok(KeyOutcome::Consumed)
}

/// Move to the start of the word before the cursor.
pub(crate) fn move_word_left<C: EditorContext>(ctx: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    let line = ctx.line_mut();
    let target = bounds::next_start_of_word(line.text(), line.cursor());
    line.set_cursor(target);
    Ok(KeyOutcome::Consumed)
}

/// Move to the end of the word at or after the cursor.
pub(crate) fn move_word_right<C: EditorContext>(ctx: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    let line = ctx.line_mut();
    let target = bounds::end_of_word(line.text(), line.cursor());
    line.set_cursor(target);
    Ok(KeyOutcome::Consumed)
}

pub(crate) fn delete_before<C: EditorContext>(ctx: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.line_mut().remove_before_cursor();
    Ok(KeyOutcome::Consumed)
}

pub(crate) fn delete_after<C: EditorContext>(ctx: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.line_mut().remove_after_cursor();
    Ok(KeyOutcome::Consumed)
}

pub(crate) fn finish<C: EditorContext>(_: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    Ok(KeyOutcome::Finished)
}

pub(crate) fn abort<C: EditorContext>(_: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    Ok(KeyOutcome::Aborted)
}

/// Blank the screen and paint the line again in the top left corner.
pub(crate) fn clear_screen<C: EditorContext>(ctx: &mut C, term: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    term.clear()?;
    ctx.line_mut().relocate(ORIGIN);
    Ok(KeyOutcome::Consumed)
}

/// Commit the line to the history and finish the session.
pub(crate) fn commit<C: SessionContext>(ctx: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.session().commit();
    Ok(KeyOutcome::Finished)
}

pub(crate) fn history_up<C: SessionContext>(ctx: &mut C, term: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.session().navigate(term, Navigation::Up)?;
    Ok(KeyOutcome::Consumed)
}

pub(crate) fn history_down<C: SessionContext>(ctx: &mut C, term: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.session().navigate(term, Navigation::Down)?;
    Ok(KeyOutcome::Consumed)
}

pub(crate) fn history_first<C: SessionContext>(ctx: &mut C, term: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.session().navigate(term, Navigation::First)?;
    Ok(KeyOutcome::Consumed)
}

pub(crate) fn history_last<C: SessionContext>(ctx: &mut C, term: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.session().navigate(term, Navigation::Last)?;
    Ok(KeyOutcome::Consumed)
}

/// Cut from the cursor to the end of the line.
pub(crate) fn kill_to_end<C: SessionContext>(ctx: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    let session = ctx.session();
    let (cursor, len) = (session.line.cursor(), session.line.len());
    session.cut(cursor, len.saturating_sub(cursor));
    Ok(KeyOutcome::Consumed)
}

pub(crate) fn paste<C: SessionContext>(ctx: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.session().paste();
    Ok(KeyOutcome::Consumed)
}

pub(crate) fn undo<C: SessionContext>(ctx: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.session().line.undo();
    Ok(KeyOutcome::Consumed)
}

pub(crate) fn undo_all<C: SessionContext>(ctx: &mut C, _: &mut dyn Terminal, _: KeyPress) -> Outcome<C> {
    ctx.session().line.undo_all();
    Ok(KeyOutcome::Consumed)
}
