use line_block::{
    key,
    prelude::*,
    terminal::{Coords, Screen},
};
use pretty_assertions::assert_eq;

fn editor(history: &[&str]) -> ReadLineEditor<VirtualTerminal> {
    ReadLineEditor::builder()
        .terminal(VirtualTerminal::new(80))
        .prompt("> ")
        .history(history.iter().copied())
        .build()
        .unwrap()
}

fn read(editor: &mut ReadLineEditor<VirtualTerminal>, keys: &[KeyPress]) -> Option<String> {
    editor.terminal_mut().push_keys(keys.iter().copied());
    editor.read_line().unwrap()
}

const ENTER: KeyPress = key!(@name Enter);

#[test]
fn enter_commits_the_typed_line() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("hello");
    assert_eq!(read(&mut editor, &[ENTER]).as_deref(), Some("hello"));
    assert_eq!(editor.history(), vec!["hello".to_string()]);
    assert_eq!(editor.terminal().row(0), "> hello");
}

#[test]
fn ctrl_d_on_an_empty_line_ends_the_input() {
    let mut editor = editor(&[]);
    assert_eq!(read(&mut editor, &[key!(CONTROL-'d')]), None);
    assert!(editor.history().is_empty());

    editor.terminal_mut().type_str("ab");
    let keys = [key!(CONTROL-'a'), key!(CONTROL-'d'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("b"));
}

#[test]
fn ctrl_x_ctrl_u_undoes_the_last_edit() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("ab");
    let keys = [key!(CONTROL-'x'), key!(CONTROL-'u'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("a"));
}

#[test]
fn ctrl_x_followed_by_another_key_handles_that_key() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("ab");
    let keys = [key!(CONTROL-'x'), key!('c'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("abc"));
}

#[test]
fn ctrl_x_ctrl_x_swaps_with_the_alternate_cursor() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("abc");
    let keys = [key!(CONTROL-'x'), key!(CONTROL-'x'), key!('_'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("_abc"));
}

#[test]
fn inert_ctrl_x_commands_change_nothing() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("ab");
    let keys = [
        key!(CONTROL-'x'), key!(CONTROL-'e'),
        key!(CONTROL-'x'), key!(CONTROL-'r'),
        key!(CONTROL-'x'), key!(CONTROL-'v'),
        ENTER,
    ];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("ab"));
}

#[test]
fn ctrl_v_inserts_the_next_key_literally() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("a");
    let keys = [key!(CONTROL-'v'), key!(@name Tab), key!('b'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("a\tb"));
}

#[test]
fn ctrl_r_recalls_a_matching_entry() {
    let mut editor = editor(&["git status", "ls", "make"]);
    editor.terminal_mut().push_key(key!(CONTROL-'r'));
    editor.terminal_mut().type_str("git");
    assert_eq!(read(&mut editor, &[ENTER, ENTER]).as_deref(), Some("git status"));
    assert_eq!(editor.terminal().row(0), "> git status");
}

#[test]
fn an_abandoned_search_keeps_the_line() {
    let mut editor = editor(&["git status"]);
    editor.terminal_mut().type_str("draft");
    editor.terminal_mut().push_key(key!(CONTROL-'r'));
    editor.terminal_mut().type_str("git");
    let keys = [key!(CONTROL-'g'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("draft"));
}

#[test]
fn history_navigation_keeps_edits_to_recalled_lines() {
    let mut editor = editor(&["one", "two"]);
    editor.terminal_mut().type_str("x");
    editor.terminal_mut().push_key(key!(@name Up));
    editor.terminal_mut().type_str("!");
    let keys = [
        key!(@name Up),
        key!(@name Down),
        key!(CONTROL-'e'),
    ];
    editor.terminal_mut().push_keys(keys);
    assert_eq!(read(&mut editor, &[ENTER]).as_deref(), Some("two!"));
    assert_eq!(editor.history(), ["one", "two", "two!"].map(String::from).to_vec());
}

#[test]
fn the_in_progress_line_survives_a_trip_through_history() {
    let mut editor = editor(&["one", "two"]);
    editor.terminal_mut().type_str("x");
    let keys = [key!(ALT-'<'), key!(ALT-'>'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("x"));
}

#[test]
fn cut_text_can_be_pasted_back() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("hello world");
    let keys = [key!(CONTROL-'w'), key!(CONTROL-'a'), key!(CONTROL-'y'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("worldhello "));
    assert_eq!(editor.clipboard().text().as_deref(), Some("world"));
}

#[test]
fn ctrl_k_cuts_to_the_end_of_the_line() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("abc");
    let keys = [key!(CONTROL-'b'), key!(CONTROL-'b'), key!(CONTROL-'k'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("a"));
    assert_eq!(editor.clipboard().text().as_deref(), Some("bc"));
}

#[test]
fn alt_d_cuts_the_word_after_the_cursor() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("hello world");
    let keys = [key!(CONTROL-'a'), key!(ALT-'d'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some(" world"));
    assert_eq!(editor.clipboard().text().as_deref(), Some("hello"));
}

#[test]
fn ctrl_u_discards_without_touching_the_clipboard() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("hello world");
    editor.terminal_mut().push_keys([key!(CONTROL-'w'), key!(CONTROL-'u')]);
    let keys = [key!(CONTROL-'y'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("world"));
    assert_eq!(editor.clipboard().text().as_deref(), Some("world"));

    editor.terminal_mut().type_str("abc def");
    let keys = [key!(CONTROL-'b'), key!(CONTROL-'b'), key!(CONTROL-'b'), key!(CONTROL-'u'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("def"));
    assert_eq!(editor.clipboard().text().as_deref(), Some("world"));
}

#[test]
fn alt_r_reverts_a_recalled_line() {
    let mut editor = editor(&["make"]);
    editor.terminal_mut().push_key(key!(@name Up));
    editor.terminal_mut().type_str("s");
    editor.terminal_mut().push_keys([
        key!(@name Backspace),
        key!(@name Backspace),
        key!(@name Backspace),
        key!(ALT-'r'),
    ]);
    editor.terminal_mut().type_str("!");
    assert_eq!(read(&mut editor, &[ENTER]).as_deref(), Some("make!"));
    assert_eq!(editor.history(), ["make", "make!"].map(String::from).to_vec());
}

#[test]
fn ctrl_l_clears_the_screen_and_repaints_at_the_top() {
    let mut editor = editor(&[]);
    editor.terminal_mut().set_cursor(Coords::new(0, 2)).unwrap();
    editor.terminal_mut().type_str("ls");
    let keys = [key!(CONTROL-'l'), key!('!'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("ls!"));
    assert_eq!(editor.terminal().row(0), "> ls!");
    assert_eq!(editor.terminal().row(2), "");
    assert_eq!(editor.terminal().cursor(), Coords::new(5, 0));
}

#[test]
fn alt_f_and_alt_b_move_by_words() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("one two three");
    editor.terminal_mut().push_keys([key!(CONTROL-'a'), key!(ALT-'f'), key!(ALT-'f')]);
    editor.terminal_mut().type_str("!");
    editor.terminal_mut().push_key(key!(ALT-'b'));
    editor.terminal_mut().type_str("^");
    assert_eq!(read(&mut editor, &[ENTER]).as_deref(), Some("one ^two! three"));
}

#[test]
fn ctrl_underscore_undoes_edits_and_motions() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("abc");
    editor.terminal_mut().push_keys([
        key!(CONTROL-'a'),
        key!(CONTROL-'_'),
        key!(CONTROL-'_'),
    ]);
    editor.terminal_mut().type_str("!");
    assert_eq!(read(&mut editor, &[ENTER]).as_deref(), Some("ab!"));
}

#[test]
fn ctrl_p_and_ctrl_n_walk_the_history() {
    let mut editor = editor(&["one", "two", "three"]);
    let keys = [
        key!(CONTROL-'p'),
        key!(CONTROL-'p'),
        key!(CONTROL-'p'),
        key!(CONTROL-'p'),
        key!(CONTROL-'n'),
        ENTER,
    ];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("two"));

    editor.terminal_mut().type_str("x");
    let keys = [key!(CONTROL-'p'), key!(CONTROL-'n'), key!(CONTROL-'n'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("x"));
}

#[test]
fn backspace_and_delete_remove_single_characters() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("abcd");
    let keys = [
        key!(@name Backspace),
        key!(@name Home),
        key!(@name Backspace),
        key!(@name Delete),
        key!(CONTROL-'f'),
        key!(CONTROL-'h'),
        ENTER,
    ];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("c"));
}

#[test]
fn combining_marks_stay_with_their_base_character() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("e\u{301}");
    let keys = [key!(CONTROL-'k'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("e\u{301}"));
    assert_eq!(editor.clipboard().text(), None);

    editor.terminal_mut().type_str("e\u{301}");
    let keys = [key!(@name Backspace), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some(""));

    editor.terminal_mut().type_str("ae\u{301}");
    let keys = [key!(CONTROL-'b'), key!(CONTROL-'k'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("a"));
    assert_eq!(editor.clipboard().text().as_deref(), Some("e\u{301}"));
}

#[test]
fn alt_hash_comments_out_the_line() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("rm -rf");
    assert_eq!(read(&mut editor, &[key!(ALT-'#')]).as_deref(), Some("#rm -rf"));
    assert_eq!(editor.history(), vec!["#rm -rf".to_string()]);
}

#[test]
fn word_case_commands() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("one two three");
    let keys = [
        key!(CONTROL-'a'),
        key!(ALT-'u'),
        key!(ALT-'c'),
        key!(ALT-'l'),
        ENTER,
    ];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("ONE Two three"));
}

#[test]
fn ctrl_t_transposes_characters() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("abc");
    let keys = [key!(CONTROL-'b'), key!(CONTROL-'t'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("acb"));
}

#[test]
fn alt_dot_inserts_the_last_word_of_the_last_entry() {
    let mut editor = editor(&["vim notes.txt"]);
    editor.terminal_mut().type_str("cat ");
    let keys = [key!(ALT-'.'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("cat notes.txt"));
}

#[test]
fn alt_backslash_deletes_surrounding_whitespace() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("123  abcd");
    let keys = [
        key!(CONTROL-'a'),
        key!(CONTROL-'f'),
        key!(CONTROL-'f'),
        key!(CONTROL-'f'),
        key!(CONTROL-'f'),
        key!(ALT-'\\'),
        ENTER,
    ];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("123abcd"));
}

#[test]
fn insert_toggles_overwriting() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("abc");
    editor.terminal_mut().push_keys([key!(CONTROL-'a'), key!(@name Insert)]);
    editor.terminal_mut().type_str("xy");
    assert_eq!(read(&mut editor, &[ENTER]).as_deref(), Some("xyc"));
}

#[test]
fn single_character_word_jumps() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("ab c de f");
    let keys = [
        key!(CONTROL-'a'),
        key!(CONTROL-']'),
        key!('1'),
        key!(CONTROL-'e'),
        key!(CONTROL|ALT-']'),
        key!('2'),
        ENTER,
    ];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("ab 1c de 2f"));
}

#[test]
fn tab_completes_from_the_candidates() {
    let mut editor = ReadLineEditor::builder()
        .terminal(VirtualTerminal::new(80))
        .prompt("> ")
        .completions(["status", "stash", "commit"])
        .build()
        .unwrap();
    editor.terminal_mut().type_str("git co");
    editor.terminal_mut().push_key(key!(@name Tab));
    editor.terminal_mut().type_str(" st");
    editor.terminal_mut().push_keys([key!(@name Tab), key!('t'), key!(@name Tab)]);
    assert_eq!(read(&mut editor, &[ENTER]).as_deref(), Some("git commit status"));
}

#[test]
fn tab_without_candidates_does_nothing() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("git");
    let keys = [key!(@name Tab), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("git"));
}

#[test]
fn ambiguous_completions_are_previewed_until_the_next_key() {
    let mut editor = ReadLineEditor::builder()
        .terminal(VirtualTerminal::new(80))
        .prompt("> ")
        .completions(["status", "stash"])
        .show_completion_alternatives(true)
        .build()
        .unwrap();
    editor.terminal_mut().type_str("sta");
    editor.terminal_mut().push_key(key!(@name Tab));
    assert!(editor.read_line().is_err());
    assert_eq!(editor.terminal().row(0), "> sta  [stash status]");
    assert_eq!(editor.preview(), "  [stash status]");
}

#[test]
fn unbound_modified_keys_are_dropped() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("a");
    let keys = [key!(CONTROL-'q'), key!(ALT-'z'), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("a"));
}

#[test]
fn set_text_seeds_the_next_session() {
    let mut editor = editor(&[]);
    editor.set_text("draft");
    assert_eq!(editor.text(), "draft");
    editor.terminal_mut().type_str("!");
    assert_eq!(read(&mut editor, &[ENTER]).as_deref(), Some("draft!"));
}

#[test]
fn set_history_replaces_every_entry() {
    let mut editor = editor(&["old"]);
    editor.set_history(vec!["new".to_string()]);
    assert_eq!(editor.history(), vec!["new".to_string()]);
    let keys = [key!(@name Up), ENTER];
    assert_eq!(read(&mut editor, &keys).as_deref(), Some("new"));
}

#[test]
fn the_preview_follows_the_text() {
    let mut editor = editor(&[]);
    editor.set_preview(" (hint)");
    editor.terminal_mut().type_str("ab");
    assert_eq!(read(&mut editor, &[ENTER]).as_deref(), Some("ab"));
    assert_eq!(editor.terminal().row(0), "> ab (hint)");
    assert_eq!(editor.preview(), " (hint)");
}

#[test]
fn close_erases_the_line() {
    let mut editor = editor(&[]);
    editor.terminal_mut().type_str("gone");
    read(&mut editor, &[ENTER]);
    editor.close().unwrap();
    assert_eq!(editor.terminal().row(0), "");
}
