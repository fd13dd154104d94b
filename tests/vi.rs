use line_block::{key, prelude::*};
use pretty_assertions::assert_eq;

fn editor(text: &str, history: &[&str]) -> ViLineEditor<VirtualTerminal> {
    ViLineEditor::builder()
        .terminal(VirtualTerminal::new(80))
        .prompt("$ ")
        .text(text)
        .history(history.iter().copied())
        .build()
        .unwrap()
}

fn read(editor: &mut ViLineEditor<VirtualTerminal>, keys: &str) -> Option<String> {
    editor.terminal_mut().type_str(keys);
    editor.terminal_mut().push_key(ENTER);
    editor.read_line().unwrap()
}

const ENTER: KeyPress = key!(@name Enter);
const ESC: KeyPress = key!(@name Esc);

#[test]
fn insert_then_escape_then_enter() {
    let mut editor = editor("", &[]);
    editor.terminal_mut().type_str("ix");
    editor.terminal_mut().push_keys([ESC, ENTER]);
    assert_eq!(editor.read_line().unwrap().as_deref(), Some("x"));
    assert_eq!(editor.mode(), ViMode::Command);
    assert_eq!(editor.history(), vec!["x".to_string()]);
}

#[test]
fn enter_finishes_in_insert_mode_too() {
    let mut editor = editor("", &[]);
    assert_eq!(read(&mut editor, "ihello").as_deref(), Some("hello"));
    assert_eq!(editor.mode(), ViMode::Insert);
    assert_eq!(read(&mut editor, "").as_deref(), Some(""));
    assert_eq!(editor.mode(), ViMode::Command);
}

#[test]
fn motions_and_deletions() {
    let mut editor = editor("abcd", &[]);
    assert_eq!(read(&mut editor, "0xlX").as_deref(), Some("cd"));
}

#[test]
fn append_and_insert_at_the_edges() {
    let mut editor = editor("mid", &[]);
    editor.terminal_mut().type_str("Iat ");
    editor.terminal_mut().push_key(ESC);
    editor.terminal_mut().type_str("A!");
    assert_eq!(read(&mut editor, "").as_deref(), Some("at mid!"));
}

#[test]
fn a_appends_after_the_cursor() {
    let mut editor = editor("ac", &[]);
    assert_eq!(read(&mut editor, "0ab").as_deref(), Some("abc"));
}

#[test]
fn word_motions() {
    let mut editor = editor("one two three", &[]);
    editor.terminal_mut().type_str("0wi_");
    editor.terminal_mut().push_key(ESC);
    editor.terminal_mut().type_str("$bi^");
    assert_eq!(read(&mut editor, "").as_deref(), Some("one _two ^three"));
}

#[test]
fn d_cuts_to_the_end_and_p_puts_it_back() {
    let mut editor = editor("hello world", &[]);
    assert_eq!(read(&mut editor, "0wD").as_deref(), Some("hello "));
    assert_eq!(editor.clipboard().text().as_deref(), Some("world"));

    editor.set_text("ab");
    assert_eq!(read(&mut editor, "0p").as_deref(), Some("aworldb"));
}

#[test]
fn u_undoes_the_last_edit() {
    let mut editor = editor("abc", &[]);
    assert_eq!(read(&mut editor, "Xu").as_deref(), Some("abc"));
}

#[test]
fn unbound_printable_keys_are_inserted_in_command_mode() {
    let mut editor = editor("", &[]);
    assert_eq!(read(&mut editor, "zq").as_deref(), Some("zq"));
}

#[test]
fn history_navigation() {
    let mut editor = editor("", &["first", "second"]);
    assert_eq!(read(&mut editor, "kk").as_deref(), Some("first"));
    let keys = [key!(@name Up), key!(@name Up), key!(@name Up), key!(@name Down)];
    editor.terminal_mut().push_keys(keys);
    assert_eq!(read(&mut editor, "").as_deref(), Some("second"));
}

#[test]
fn insert_mode_editing_keys() {
    let mut editor = editor("", &[]);
    editor.terminal_mut().type_str("iabc");
    editor.terminal_mut().push_keys([
        key!(@name Backspace),
        key!(@name Home),
        key!(@name Delete),
        key!(@name End),
        key!(CONTROL-'h'),
    ]);
    assert_eq!(read(&mut editor, "").as_deref(), Some(""));
}

#[test]
fn colon_commands_are_remembered_and_leave_the_line_alone() {
    let mut editor = editor("text", &[]);
    editor.terminal_mut().type_str(":wq");
    editor.terminal_mut().push_key(ENTER);
    assert_eq!(read(&mut editor, "").as_deref(), Some("text"));
    assert_eq!(editor.last_command(), Some("wq"));
    assert_eq!(editor.terminal().row(0), "$ text");
}

#[test]
fn an_abandoned_colon_command_is_forgotten() {
    let mut editor = editor("", &[]);
    editor.terminal_mut().type_str(":q");
    editor.terminal_mut().push_key(ESC);
    assert_eq!(read(&mut editor, "").as_deref(), Some(""));
    assert_eq!(editor.last_command(), None);
}

#[test]
fn editors_share_a_clipboard() {
    let clipboard = Clipboard::new();
    let mut emacs = ReadLineEditor::builder()
        .terminal(VirtualTerminal::new(80))
        .clipboard(clipboard.clone())
        .build()
        .unwrap();
    let mut vi = ViLineEditor::builder()
        .terminal(VirtualTerminal::new(80))
        .clipboard(clipboard.clone())
        .build()
        .unwrap();
    emacs.terminal_mut().type_str("keep cut");
    emacs.terminal_mut().push_keys([key!(CONTROL-'w'), ENTER]);
    assert_eq!(emacs.read_line().unwrap().as_deref(), Some("keep "));
    vi.terminal_mut().type_str("p");
    vi.terminal_mut().push_key(ENTER);
    assert_eq!(vi.read_line().unwrap().as_deref(), Some("cut"));
    assert_eq!(clipboard.text().as_deref(), Some("cut"));
}
