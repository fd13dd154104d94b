//! A small shell around the line editors.
//!
//! Run with `cargo run --example readline` for the emacs-style editor, or
//! `cargo run --example readline -- --vi` for the vi-style one. Type `exit`
//! (or press Ctrl-D on an empty line in the emacs-style editor) to leave.
//! Logging goes to `readline.log`, filtered by `RUST_LOG`.

use line_block::prelude::*;
use std::fs::File;

const HISTORY_FILE: &str = ".readline.history";

fn main() -> LineBlockResult<()> {
    let log_file = File::create("readline.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let history = History::read_from_file(HISTORY_FILE)?;
    let mut editor: Box<dyn ConsoleEditor> = if std::env::args().any(|arg| arg == "--vi") {
        Box::new(ViLineEditor::builder()
            .prompt("vi> ")
            .history(history.entries().iter().cloned())
            .build()?)
    } else {
        Box::new(ReadLineEditor::builder()
            .prompt("emacs> ")
            .history(history.entries().iter().cloned())
            .completions(["cargo", "clippy", "commit", "exit", "history"])
            .show_completion_alternatives(true)
            .build()?)
    };

    loop {
        let Some(line) = editor.read_line()? else {
            println!();
            break;
        };
        println!();
        match line.trim() {
            "exit" => break,
            "history" => {
                for (idx, entry) in editor.history().iter().enumerate() {
                    println!("{idx:>4}  {entry}");
                }
            }
            _ => println!("{}", line.as_str().with(Color::Cyan)),
        }
    }

    let mut history = History::new(editor.history());
    history.trim(1000);
    history.write_to_file(HISTORY_FILE)
}
