//! An emacs-style line editor, after GNU readline.

mod search;

use crate::{
    bounds,
    clipboard::Clipboard,
    editor::ConsoleEditor,
    error::LineBlockResult,
    handlers::{self, Outcome},
    history::History,
    key,
    key::{KeyModifiers, KeyPress},
    keymap::{KeyMap, KeyOutcome},
    line::{EditLine, InsertMode},
    line_editor::{EditorContext, LineEditor},
    session::{Session, SessionContext},
    terminal::{CrosstermTerminal, Terminal},
    trie::PrefixTrie,
};
use itertools::Itertools;
use std::io::Stdout;
use unicode_segmentation::UnicodeSegmentation;

/// The first key of a two-key command, while waiting for the second.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
enum Prefix {
    #[default]
    Idle,
    /// Ctrl-X was pressed
    AwaitingCtrlX,
    /// Ctrl-V was pressed; the next key is inserted as is
    AwaitingLiteral,
}

pub(crate) struct ReadLineContext {
    session: Session,
    prefix: Prefix,
    alternate_cursor: usize,
    completions: PrefixTrie<char>,
    show_completion_alternatives: bool,
    /// The preview to restore once the completion alternatives are dismissed
    shadowed_preview: Option<String>,
    search_prompt: String,
}

impl ReadLineContext {
    fn begin(&mut self, term: &mut dyn Terminal, text: &str, preview: &str) -> LineBlockResult<()> {
        let origin = term.cursor_position()?;
        self.session.begin(origin, text, preview);
        self.prefix = Prefix::Idle;
        self.alternate_cursor = 0;
        self.shadowed_preview = None;
        Ok(())
    }

    /// Resolve the second key of a Ctrl-X sequence. Keys that don't
    /// continue the sequence are handled as if Ctrl-X was never pressed.
    fn continue_ctrl_x(&mut self, key: KeyPress) -> Option<KeyOutcome<()>> {
        if key.modifiers != KeyModifiers::CONTROL {
            return None;
        }
        match key.char()? {
            'u' => self.session.line.undo(),
            'x' => {
                let line = &mut self.session.line;
                let other = self.alternate_cursor.min(line.len());
                self.alternate_cursor = line.cursor();
                line.set_cursor(other);
            }
            'e' => log::debug!("Ctrl-X Ctrl-E: no external editor is configured"),
            'r' => log::debug!("Ctrl-X Ctrl-R: there is no init file to reload"),
            'v' => log::debug!("Ctrl-X Ctrl-V: version display is not supported"),
            _ => return None,
        }
        Some(KeyOutcome::Consumed)
    }
}

impl EditorContext for ReadLineContext {
    type Mode = ();

    fn line(&self) -> &dyn EditLine {
        &self.session.line
    }

    fn line_mut(&mut self) -> &mut dyn EditLine {
        &mut self.session.line
    }

    fn intercept(
        &mut self,
        _term: &mut dyn Terminal,
        key: KeyPress,
    ) -> LineBlockResult<Option<KeyOutcome<()>>> {
        if let Some(preview) = self.shadowed_preview.take() {
            self.session.line.set_preview(&preview);
        }
        let prefix = std::mem::take(&mut self.prefix);
        let outcome = match prefix {
            Prefix::Idle => None,
            Prefix::AwaitingLiteral => key.literal().map(|c| {
                self.session.line.insert_char(c);
                KeyOutcome::Consumed
            }),
            Prefix::AwaitingCtrlX => self.continue_ctrl_x(key),
        };
        if prefix != Prefix::Idle {
            log::debug!("{prefix:?} followed by {key}: {outcome:?}");
        }
        Ok(outcome)
    }
}

impl SessionContext for ReadLineContext {
    fn session(&mut self) -> &mut Session {
        &mut self.session
    }
}

/// Ctrl-D deletes forward, or ends the input on an empty line.
fn delete_or_eof(ctx: &mut ReadLineContext, term: &mut dyn Terminal, key: KeyPress) -> Outcome<ReadLineContext> {
    if ctx.line().is_empty() {
        return Ok(KeyOutcome::Aborted);
    }
    handlers::delete_after(ctx, term, key)
}

fn toggle_insert_mode(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    let line = ctx.line_mut();
    line.set_insert_mode(line.insert_mode().toggled());
    Ok(KeyOutcome::Consumed)
}

/// Cut the word before the cursor.
fn kill_word_before(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    let line = &ctx.session.line;
    let cursor = line.cursor();
    let start = bounds::next_start_of_word(line.text(), cursor);
    ctx.session.cut(start, cursor - start);
    Ok(KeyOutcome::Consumed)
}

/// Cut up to the end of the word at or after the cursor.
fn kill_word_after(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    let line = &ctx.session.line;
    let cursor = line.cursor();
    let end = bounds::end_of_word(line.text(), cursor);
    ctx.session.cut(cursor, end - cursor);
    Ok(KeyOutcome::Consumed)
}

/// Remove everything before the cursor, bypassing the clipboard.
fn discard_to_start(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    let line = ctx.line_mut();
    let cursor = line.cursor();
    line.remove(0, cursor);
    Ok(KeyOutcome::Consumed)
}

/// Remove the whitespace around the cursor.
fn delete_whitespace(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    let line = ctx.line_mut();
    let (start, end) = bounds::bounds_of_whitespace(line.text(), line.cursor());
    if end > start {
        line.remove(start, end - start);
    }
    Ok(KeyOutcome::Consumed)
}

/// Swap the character before the cursor with the one under it.
fn transpose(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    let line = ctx.line_mut();
    if line.cursor() == 0 || line.cursor() == line.len() {
        return Ok(KeyOutcome::Consumed);
    }
    if let Some(before) = line.remove_before_cursor() {
        line.move_cursor_right();
        let mode = line.insert_mode();
        line.set_insert_mode(InsertMode::Insert);
        line.insert_str(&before);
        line.set_insert_mode(mode);
    }
    Ok(KeyOutcome::Consumed)
}

/// Replace the rest of the word at or after the cursor with `f` of it,
/// leaving the cursor at the end of the word.
fn transform_word(ctx: &mut ReadLineContext, f: fn(&str) -> String) {
    let line = ctx.line_mut();
    let cursor = line.cursor();
    let end = bounds::end_of_word(line.text(), cursor);
    if let Some(word) = line.remove(cursor, end - cursor) {
        let mode = line.insert_mode();
        line.set_insert_mode(InsertMode::Insert);
        line.insert_str(&f(&word));
        line.set_insert_mode(mode);
    }
}

fn capitalize(word: &str) -> String {
    let mut first = true;
    word.chars()
        .map(|c| {
            if first && c.is_alphanumeric() {
                first = false;
                c.to_uppercase().collect::<String>()
            } else {
                c.to_lowercase().collect()
            }
        })
        .collect()
}

fn capitalize_word(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    transform_word(ctx, capitalize);
    Ok(KeyOutcome::Consumed)
}

fn lowercase_word(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    transform_word(ctx, str::to_lowercase);
    Ok(KeyOutcome::Consumed)
}

fn uppercase_word(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    transform_word(ctx, str::to_uppercase);
    Ok(KeyOutcome::Consumed)
}

fn jump_to_single_char_word_right(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    let line = ctx.line_mut();
    if let Some(pos) = bounds::find_single_char_word_right(line.text(), line.cursor() + 1) {
        line.set_cursor(pos);
    }
    Ok(KeyOutcome::Consumed)
}

fn jump_to_single_char_word_left(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    let line = ctx.line_mut();
    if let Some(pos) = bounds::find_single_char_word_left(line.text(), line.cursor()) {
        line.set_cursor(pos);
    }
    Ok(KeyOutcome::Consumed)
}

fn begin_ctrl_x(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    ctx.prefix = Prefix::AwaitingCtrlX;
    Ok(KeyOutcome::Consumed)
}

fn begin_literal(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    ctx.prefix = Prefix::AwaitingLiteral;
    Ok(KeyOutcome::Consumed)
}

/// Comment the line out and commit it.
fn commit_as_comment(ctx: &mut ReadLineContext, term: &mut dyn Terminal, key: KeyPress) -> Outcome<ReadLineContext> {
    let line = ctx.line_mut();
    line.move_to_start();
    line.set_insert_mode(InsertMode::Insert);
    line.insert_char('#');
    handlers::commit(ctx, term, key)
}

/// Insert the last word of the most recent history entry.
fn yank_last_arg(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    let Some(entry) = ctx.session.history.last() else {
        return Ok(KeyOutcome::Consumed);
    };
    let start = bounds::next_start_of_word(entry, entry.graphemes(true).count());
    let end = bounds::end_of_word(entry, start);
    let word: String = entry.graphemes(true).take(end).skip(start).collect();
    ctx.session.line.insert_str(&word);
    Ok(KeyOutcome::Consumed)
}

/// Search the history; an accepted match replaces the line.
fn reverse_search(ctx: &mut ReadLineContext, term: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    let origin = ctx.session.line.origin();
    ctx.session.line.close(term)?;
    let hit = search::reverse_search(&ctx.session.history, term, &ctx.search_prompt, origin)?;
    let line = ctx.line_mut();
    if let Some(hit) = hit {
        line.set_text(&hit);
        line.move_to_end();
    }
    line.relocate(origin);
    Ok(KeyOutcome::Consumed)
}

/// Complete the word before the cursor from the completion candidates.
fn complete(ctx: &mut ReadLineContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ReadLineContext> {
    if ctx.completions.is_empty() {
        return Ok(KeyOutcome::Consumed);
    }
    let line = &mut ctx.session.line;
    let cursor = line.cursor();
    let (start, _) = bounds::bounds_of_word(line.text(), cursor);
    let prefix: String = line.text().graphemes(true).take(cursor).skip(start).collect();
    let suffixes = ctx.completions.completions_of(&prefix);
    log::debug!("completing {prefix:?}: {} candidates", suffixes.len());
    let common = common_prefix(&suffixes);
    if !common.is_empty() {
        line.insert_str(&common);
    } else if suffixes.len() > 1 && ctx.show_completion_alternatives {
        let alternatives = suffixes.iter().map(|suffix| format!("{prefix}{suffix}")).join(" ");
        ctx.shadowed_preview = Some(line.preview().to_string());
        line.set_preview(&format!("  [{alternatives}]"));
    }
    Ok(KeyOutcome::Consumed)
}

/// The longest run of characters every one of `words` starts with.
fn common_prefix(words: &[String]) -> String {
    let mut columns: Vec<_> = words.iter().map(|word| word.chars()).collect();
    let mut common = String::new();
    if columns.is_empty() {
        return common;
    }
    loop {
        let column: Vec<Option<char>> = columns.iter_mut().map(Iterator::next).collect();
        match column[0] {
            Some(c) if column.iter().all_equal() => common.push(c),
            _ => return common,
        }
    }
}

fn keymap() -> LineBlockResult<KeyMap<ReadLineContext>> {
    let mut keymap = KeyMap::<ReadLineContext>::new(handlers::insert_printable);
    keymap
        .bind(key!(@name Enter), handlers::commit)?
        .bind(key!(@name Left), handlers::move_left)?
        .bind(key!(@name Right), handlers::move_right)?
        .bind(key!(@name Up), handlers::history_up)?
        .bind(key!(@name Down), handlers::history_down)?
        .bind(key!(@name Home), handlers::move_to_start)?
        .bind(key!(@name End), handlers::move_to_end)?
        .bind(key!(@name Insert), toggle_insert_mode)?
        .bind(key!(@name Delete), handlers::delete_after)?
        .bind(key!(@name Backspace), handlers::delete_before)?
        .bind(key!(@name Tab), complete)?;

    // Ctrl-key combinations
    keymap
        .bind(key!(CONTROL-'a'), handlers::move_to_start)?
        .bind(key!(CONTROL-'b'), handlers::move_left)?
        .bind(key!(CONTROL-'d'), delete_or_eof)?
        .bind(key!(CONTROL-'e'), handlers::move_to_end)?
        .bind(key!(CONTROL-'f'), handlers::move_right)?
        .bind(key!(CONTROL-'h'), handlers::delete_before)?
        .bind(key!(CONTROL-'k'), handlers::kill_to_end)?
        .bind(key!(CONTROL-'l'), handlers::clear_screen)?
        .bind(key!(CONTROL-'n'), handlers::history_down)?
        .bind(key!(CONTROL-'p'), handlers::history_up)?
        .bind(key!(CONTROL-'r'), reverse_search)?
        .bind(key!(CONTROL-'t'), transpose)?
        .bind(key!(CONTROL-'u'), discard_to_start)?
        .bind(key!(CONTROL-'v'), begin_literal)?
        .bind(key!(CONTROL-'w'), kill_word_before)?
        .bind(key!(CONTROL-'x'), begin_ctrl_x)?
        .bind(key!(CONTROL-'y'), handlers::paste)?
        .bind(key!(CONTROL-'_'), handlers::undo)?
        .bind(key!(CONTROL-']'), jump_to_single_char_word_right)?
        .bind(key!(CONTROL|ALT-']'), jump_to_single_char_word_left)?;

    // Alt-key combinations
    keymap
        .bind(key!(ALT-'b'), handlers::move_word_left)?
        .bind(key!(ALT-'c'), capitalize_word)?
        .bind(key!(ALT-'d'), kill_word_after)?
        .bind(key!(ALT-'f'), handlers::move_word_right)?
        .bind(key!(ALT-'l'), lowercase_word)?
        .bind(key!(ALT-'r'), handlers::undo_all)?
        .bind(key!(ALT-'u'), uppercase_word)?
        .bind(key!(ALT-'<'), handlers::history_first)?
        .bind(key!(ALT-'>'), handlers::history_last)?
        .bind(key!(ALT-'#'), commit_as_comment)?
        .bind(key!(ALT-'.'), yank_last_arg)?
        .bind(key!(ALT-'\\'), delete_whitespace)?;
    Ok(keymap)
}

/// Builds a [`ReadLineEditor`].
pub struct ReadLineEditorBuilder<T: Terminal> {
    terminal: T,
    prompt: String,
    text: String,
    preview: String,
    history: Vec<String>,
    clipboard: Clipboard,
    reverse_search_prompt: String,
    completions: Vec<String>,
    show_completion_alternatives: bool,
}

impl Default for ReadLineEditorBuilder<CrosstermTerminal<Stdout>> {
    fn default() -> Self {
        Self {
            terminal: CrosstermTerminal::default(),
            prompt: String::new(),
            text: String::new(),
            preview: String::new(),
            history: vec![],
            clipboard: Clipboard::default(),
            reverse_search_prompt: "Reverse search: ".to_string(),
            completions: vec![],
            show_completion_alternatives: false,
        }
    }
}

impl<T: Terminal> ReadLineEditorBuilder<T> {
    pub fn terminal<U: Terminal>(self, terminal: U) -> ReadLineEditorBuilder<U> {
        ReadLineEditorBuilder {
            terminal,
            prompt: self.prompt,
            text: self.text,
            preview: self.preview,
            history: self.history,
            clipboard: self.clipboard,
            reverse_search_prompt: self.reverse_search_prompt,
            completions: self.completions,
            show_completion_alternatives: self.show_completion_alternatives,
        }
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// The text the first session starts out with.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = preview.into();
        self
    }

    pub fn history(mut self, entries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.history = entries.into_iter().map(Into::into).collect();
        self
    }

    pub fn clipboard(mut self, clipboard: Clipboard) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn reverse_search_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.reverse_search_prompt = prompt.into();
        self
    }

    /// The words Tab completes to.
    pub fn completions(mut self, words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.completions = words.into_iter().map(Into::into).collect();
        self
    }

    /// Whether Tab lists the candidates when it can't pick one.
    pub fn show_completion_alternatives(mut self, show: bool) -> Self {
        self.show_completion_alternatives = show;
        self
    }

    pub fn build(self) -> LineBlockResult<ReadLineEditor<T>> {
        let history = History::new(self.history);
        let context = ReadLineContext {
            session: Session::new(&self.prompt, &self.text, history, self.clipboard),
            prefix: Prefix::Idle,
            alternate_cursor: 0,
            completions: self.completions.iter().collect(),
            show_completion_alternatives: self.show_completion_alternatives,
            shadowed_preview: None,
            search_prompt: self.reverse_search_prompt,
        };
        Ok(ReadLineEditor {
            terminal: self.terminal,
            context,
            line_editor: LineEditor::new((), keymap()?),
            seed: Some(self.text),
            preview: self.preview,
        })
    }
}

/// An emacs-style line editor.
pub struct ReadLineEditor<T: Terminal> {
    terminal: T,
    context: ReadLineContext,
    line_editor: LineEditor<ReadLineContext>,
    /// The text the next session starts out with
    seed: Option<String>,
    preview: String,
}

impl ReadLineEditor<CrosstermTerminal<Stdout>> {
    pub fn builder() -> ReadLineEditorBuilder<CrosstermTerminal<Stdout>> {
        ReadLineEditorBuilder::default()
    }
}

impl<T: Terminal> ReadLineEditor<T> {
    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.context.session.clipboard
    }

    /// Replace the words Tab completes to.
    pub fn set_completions(&mut self, words: impl IntoIterator<Item = impl AsRef<str>>) {
        self.context.completions = words.into_iter().collect();
    }
}

impl<T: Terminal> ConsoleEditor for ReadLineEditor<T> {
    fn read_line(&mut self) -> LineBlockResult<Option<String>> {
        let text = self.seed.take().unwrap_or_default();
        self.context.begin(&mut self.terminal, &text, &self.preview)?;
        self.line_editor.read_line(&mut self.context, &mut self.terminal)
    }

    fn close(&mut self) -> LineBlockResult<()> {
        self.context.session.line.close(&mut self.terminal)?;
        self.terminal.flush()
    }

    fn history(&self) -> Vec<String> {
        self.context.session.history.entries().to_vec()
    }

    fn set_history(&mut self, entries: Vec<String>) {
        self.context.session.history.set_entries(entries);
    }

    fn text(&self) -> String {
        self.context.session.line.text().to_string()
    }

    fn set_text(&mut self, text: &str) {
        let line = &mut self.context.session.line;
        line.set_text(text);
        line.move_to_end();
        self.seed = Some(text.to_string());
    }

    fn preview(&self) -> String {
        self.context.session.line.preview().to_string()
    }

    fn set_preview(&mut self, preview: &str) {
        self.context.session.line.set_preview(preview);
        self.preview = preview.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn common_prefixes() {
        let words = |ws: &[&str]| ws.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        assert_eq!(common_prefix(&words(&["tatus", "tash"])), "ta");
        assert_eq!(common_prefix(&words(&["abc"])), "abc");
        assert_eq!(common_prefix(&words(&["", "x"])), "");
        assert_eq!(common_prefix(&[]), "");
    }

    #[test]
    fn capitalization() {
        assert_eq!(capitalize(" hELLO"), " Hello");
        assert_eq!(capitalize("123abc"), "123abc");
    }

    #[test]
    fn the_key_map_has_no_conflicts() {
        assert!(keymap().is_ok());
    }
}
