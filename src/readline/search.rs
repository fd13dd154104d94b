//! Reverse incremental search through the history.

use crate::{
    error::LineBlockResult,
    handlers::{self, Outcome},
    history::History,
    key,
    key::KeyPress,
    keymap::{KeyMap, KeyOutcome},
    line::{EditLine, Line},
    line_editor::{EditorContext, LineEditor},
    terminal::{Coords, Terminal},
};

pub(crate) struct SearchContext<'h> {
    line: Line,
    history: &'h History,
    hit: Option<String>,
}

impl<'h> SearchContext<'h> {
    fn search(&mut self) {
        let term = self.line.text();
        if let Some(hit) = self.history.find_last(|entry| entry.contains(term)) {
            log::trace!("reverse search {term:?} hit {hit:?}");
            self.line.set_preview(&format!(": {hit}"));
            self.hit = Some(hit.to_string());
        }
    }
}

impl<'h> EditorContext for SearchContext<'h> {
    type Mode = ();

    fn line(&self) -> &dyn EditLine {
        &self.line
    }

    fn line_mut(&mut self) -> &mut dyn EditLine {
        &mut self.line
    }

    fn result(&self) -> Option<String> {
        self.hit.clone()
    }
}

/// Extend the search term and look for it again. Editing the term in
/// any other way waits for the next character before searching.
fn extend_term<'h>(ctx: &mut SearchContext<'h>, _: &mut dyn Terminal, key: KeyPress) -> Outcome<SearchContext<'h>> {
    let Some(c) = key.printable() else {
        return Ok(KeyOutcome::NotConsumed);
    };
    ctx.line.insert_char(c);
    ctx.search();
    Ok(KeyOutcome::Consumed)
}

fn keymap<'h>() -> LineBlockResult<KeyMap<SearchContext<'h>>> {
    let mut keymap = KeyMap::new(extend_term);
    keymap
        .bind(key!(@name Enter), handlers::finish)?
        .bind(key!(CONTROL-'g'), handlers::abort)?
        .bind(key!(@name Left), handlers::move_left)?
        .bind(key!(@name Right), handlers::move_right)?
        .bind(key!(@name Home), handlers::move_to_start)?
        .bind(key!(@name End), handlers::move_to_end)?
        .bind(key!(@name Backspace), handlers::delete_before)?
        .bind(key!(@name Delete), handlers::delete_after)?;
    Ok(keymap)
}

/// Run a search session at `origin`. Yields the most recent history entry
/// matching the search term when the user accepts it with Enter.
pub(crate) fn reverse_search(
    history: &History,
    term: &mut dyn Terminal,
    prompt: &str,
    origin: Coords,
) -> LineBlockResult<Option<String>> {
    let mut ctx = SearchContext {
        line: Line::new(prompt, "", origin),
        history,
        hit: None,
    };
    let mut editor = LineEditor::new((), keymap()?);
    let hit = editor.read_line(&mut ctx, term)?;
    ctx.line.close(term)?;
    Ok(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::VirtualTerminal;
    use pretty_assertions::assert_eq;

    fn search(history: &History, keys: &str, last: KeyPress) -> Option<String> {
        let mut term = VirtualTerminal::new(60);
        term.type_str(keys);
        term.push_key(last);
        reverse_search(history, &mut term, "search: ", Coords::default()).unwrap()
    }

    #[test]
    fn enter_accepts_the_latest_match() {
        let history = History::new(["git status", "ls", "git stash"]);
        assert_eq!(search(&history, "git", key!(@name Enter)).as_deref(), Some("git stash"));
        assert_eq!(search(&history, "status", key!(@name Enter)).as_deref(), Some("git status"));
    }

    #[test]
    fn a_failed_search_keeps_the_previous_hit() {
        let history = History::new(["make", "cargo"]);
        assert_eq!(search(&history, "carx", key!(@name Enter)).as_deref(), Some("cargo"));
        assert_eq!(search(&history, "zzz", key!(@name Enter)), None);
    }

    #[test]
    fn ctrl_g_abandons_the_search() {
        let history = History::new(["make"]);
        assert_eq!(search(&history, "ma", key!(CONTROL-'g')), None);
    }

    #[test]
    fn the_hit_is_previewed_and_erased_afterwards() {
        let history = History::new(["echo hello"]);
        let mut term = VirtualTerminal::new(60);
        term.type_str("ech");
        let mut ctx = SearchContext {
            line: Line::new("? ", "", Coords::default()),
            history: &history,
            hit: None,
        };
        let mut editor = LineEditor::new((), keymap().unwrap());
        assert!(editor.read_line(&mut ctx, &mut term).is_err());
        assert_eq!(term.row(0), "? ech: echo hello");
        ctx.line.close(&mut term).unwrap();
        assert_eq!(term.row(0), "");
    }
}
