//! A vi-style line editor with a command mode and an insert mode.

mod command;

use crate::{
    bounds,
    clipboard::Clipboard,
    editor::ConsoleEditor,
    error::LineBlockResult,
    handlers::{self, Outcome},
    history::History,
    key,
    key::KeyPress,
    keymap::{KeyMap, KeyOutcome},
    line::EditLine,
    line_editor::{EditorContext, LineEditor},
    session::{Session, SessionContext},
    terminal::{CrosstermTerminal, Terminal},
};
use std::io::Stdout;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViMode {
    /// Keys are commands; the mode every session starts in.
    Command,
    /// Keys are text.
    Insert,
}

pub(crate) struct ViContext {
    session: Session,
    command_prompt: String,
    last_command: Option<String>,
}

impl EditorContext for ViContext {
    type Mode = ViMode;

    fn line(&self) -> &dyn EditLine {
        &self.session.line
    }

    fn line_mut(&mut self) -> &mut dyn EditLine {
        &mut self.session.line
    }
}

impl SessionContext for ViContext {
    fn session(&mut self) -> &mut Session {
        &mut self.session
    }
}

fn insert_here(_: &mut ViContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ViContext> {
    Ok(KeyOutcome::SwitchTo(ViMode::Insert))
}

fn append_here(ctx: &mut ViContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ViContext> {
    ctx.line_mut().move_cursor_right();
    Ok(KeyOutcome::SwitchTo(ViMode::Insert))
}

fn insert_at_start(ctx: &mut ViContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ViContext> {
    ctx.line_mut().move_to_start();
    Ok(KeyOutcome::SwitchTo(ViMode::Insert))
}

fn append_at_end(ctx: &mut ViContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ViContext> {
    ctx.line_mut().move_to_end();
    Ok(KeyOutcome::SwitchTo(ViMode::Insert))
}

fn to_command_mode(_: &mut ViContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ViContext> {
    Ok(KeyOutcome::SwitchTo(ViMode::Command))
}

/// Move to the start of the next word.
fn next_word(ctx: &mut ViContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ViContext> {
    let line = ctx.line_mut();
    let target = bounds::start_of_next_word(line.text(), line.cursor());
    line.set_cursor(target);
    Ok(KeyOutcome::Consumed)
}

/// Paste the clipboard after the character under the cursor.
fn put_after(ctx: &mut ViContext, _: &mut dyn Terminal, _: KeyPress) -> Outcome<ViContext> {
    if ctx.session.clipboard.text().is_some() {
        ctx.session.line.move_cursor_right();
        ctx.session.paste();
    }
    Ok(KeyOutcome::Consumed)
}

/// Open the command line where the edited line is, and put the line back
/// once the command is read.
fn colon_command(ctx: &mut ViContext, term: &mut dyn Terminal, _: KeyPress) -> Outcome<ViContext> {
    let origin = ctx.session.line.origin();
    ctx.session.line.close(term)?;
    if let Some(command) = command::read_command(term, &ctx.command_prompt, origin)? {
        log::debug!("vi command {command:?} entered; commands are not dispatched");
        ctx.last_command = Some(command);
    }
    ctx.session.line.relocate(origin);
    Ok(KeyOutcome::Consumed)
}

fn command_keymap() -> LineBlockResult<KeyMap<ViContext>> {
    let mut keymap = KeyMap::<ViContext>::new(handlers::insert_printable);
    keymap
        .bind(key!(@name Enter), handlers::commit)?
        .bind_all([key!('h'), key!(@name Left)], handlers::move_left)?
        .bind_all([key!('l'), key!(@name Right)], handlers::move_right)?
        .bind_all([key!('k'), key!(@name Up)], handlers::history_up)?
        .bind_all([key!('j'), key!(@name Down)], handlers::history_down)?
        .bind_all([key!('0'), key!('^'), key!(@name Home)], handlers::move_to_start)?
        .bind_all([key!('$'), key!(@name End)], handlers::move_to_end)?
        .bind(key!('b'), handlers::move_word_left)?
        .bind(key!('w'), next_word)?
        .bind(key!('a'), append_here)?
        .bind(key!('A'), append_at_end)?
        .bind(key!('i'), insert_here)?
        .bind(key!('I'), insert_at_start)?
        .bind(key!('x'), handlers::delete_after)?
        .bind(key!('X'), handlers::delete_before)?
        .bind(key!('D'), handlers::kill_to_end)?
        .bind(key!('u'), handlers::undo)?
        .bind(key!('p'), put_after)?
        .bind(key!(':'), colon_command)?
        .bind(key!(CONTROL-'l'), handlers::clear_screen)?;
    Ok(keymap)
}

fn insert_keymap() -> LineBlockResult<KeyMap<ViContext>> {
    let mut keymap = KeyMap::<ViContext>::new(handlers::insert_printable);
    keymap
        .bind(key!(@name Enter), handlers::commit)?
        .bind(key!(@name Esc), to_command_mode)?
        .bind_all([key!(@name Backspace), key!(CONTROL-'h')], handlers::delete_before)?
        .bind(key!(@name Delete), handlers::delete_after)?
        .bind(key!(@name Left), handlers::move_left)?
        .bind(key!(@name Right), handlers::move_right)?
        .bind(key!(@name Home), handlers::move_to_start)?
        .bind(key!(@name End), handlers::move_to_end)?
        .bind(key!(CONTROL-'w'), handlers::move_word_left)?;
    Ok(keymap)
}

/// Builds a [`ViLineEditor`].
pub struct ViLineEditorBuilder<T: Terminal> {
    terminal: T,
    prompt: String,
    text: String,
    preview: String,
    history: Vec<String>,
    clipboard: Clipboard,
    command_prompt: String,
}

impl Default for ViLineEditorBuilder<CrosstermTerminal<Stdout>> {
    fn default() -> Self {
        Self {
            terminal: CrosstermTerminal::default(),
            prompt: String::new(),
            text: String::new(),
            preview: String::new(),
            history: vec![],
            clipboard: Clipboard::default(),
            command_prompt: ":".to_string(),
        }
    }
}

impl<T: Terminal> ViLineEditorBuilder<T> {
    pub fn terminal<U: Terminal>(self, terminal: U) -> ViLineEditorBuilder<U> {
        ViLineEditorBuilder {
            terminal,
            prompt: self.prompt,
            text: self.text,
            preview: self.preview,
            history: self.history,
            clipboard: self.clipboard,
            command_prompt: self.command_prompt,
        }
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

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

    /// The prompt of the `:` command line.
    pub fn command_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.command_prompt = prompt.into();
        self
    }

    pub fn build(self) -> LineBlockResult<ViLineEditor<T>> {
        let history = History::new(self.history);
        let context = ViContext {
            session: Session::new(&self.prompt, &self.text, history, self.clipboard),
            command_prompt: self.command_prompt,
            last_command: None,
        };
        let line_editor = LineEditor::new(ViMode::Command, command_keymap()?)
            .with_mode(ViMode::Insert, insert_keymap()?);
        line_editor.require_modes([ViMode::Command, ViMode::Insert])?;
        Ok(ViLineEditor {
            terminal: self.terminal,
            context,
            line_editor,
            seed: Some(self.text),
            preview: self.preview,
        })
    }
}

/// A vi-style line editor. Every session starts in [`ViMode::Command`].
pub struct ViLineEditor<T: Terminal> {
    terminal: T,
    context: ViContext,
    line_editor: LineEditor<ViContext>,
    seed: Option<String>,
    preview: String,
}

impl ViLineEditor<CrosstermTerminal<Stdout>> {
    pub fn builder() -> ViLineEditorBuilder<CrosstermTerminal<Stdout>> {
        ViLineEditorBuilder::default()
    }
}

impl<T: Terminal> ViLineEditor<T> {
    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.context.session.clipboard
    }

    /// The mode the editor was in when the last session ended.
    pub fn mode(&self) -> ViMode {
        self.line_editor.mode()
    }

    /// The most recent command entered on the `:` command line.
    pub fn last_command(&self) -> Option<&str> {
        self.context.last_command.as_deref()
    }
}

impl<T: Terminal> ConsoleEditor for ViLineEditor<T> {
    fn read_line(&mut self) -> LineBlockResult<Option<String>> {
        let origin = self.terminal.cursor_position()?;
        let text = self.seed.take().unwrap_or_default();
        self.context.session.begin(origin, &text, &self.preview);
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
