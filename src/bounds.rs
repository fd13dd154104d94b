//! Word and whitespace boundary scanning over a line of text.
//!
//! All positions are grapheme indices, matching the cursor positions of
//! [`Line`](crate::line::Line). Whitespace means a space or a tab;
//! everything else is part of a word.

use unicode_segmentation::UnicodeSegmentation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

pub fn is_whitespace(grapheme: &str) -> bool {
    grapheme == " " || grapheme == "\t"
}

fn graphemes(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// Scan from `start` (inclusive) in `direction` for the first grapheme
/// satisfying `pred`. Returns `None` when `start` is out of range or when
/// no grapheme matches.
pub fn index_of(
    text: &str,
    start: usize,
    direction: Direction,
    pred: impl Fn(&str) -> bool,
) -> Option<usize> {
    scan(&graphemes(text), start, direction, pred)
}

fn scan(
    graphemes: &[&str],
    start: usize,
    direction: Direction,
    pred: impl Fn(&str) -> bool,
) -> Option<usize> {
    if start >= graphemes.len() {
        return None;
    }
    match direction {
        Direction::Forward => (start..graphemes.len()).find(|&i| pred(graphemes[i])),
        Direction::Backward => (0..=start).rev().find(|&i| pred(graphemes[i])),
    }
}

fn is_word(grapheme: &str) -> bool {
    !is_whitespace(grapheme)
}

/// The run of whitespace around `pos`, as a half-open `(start, end)` range.
/// When there is no whitespace at `pos` the range is empty.
pub fn bounds_of_whitespace(text: &str, pos: usize) -> (usize, usize) {
    let gs = graphemes(text);
    let start = pos
        .checked_sub(1)
        .and_then(|before| scan(&gs, before, Direction::Backward, is_word))
        .map_or(0, |i| i + 1);
    let end = scan(&gs, pos, Direction::Forward, is_word).unwrap_or(gs.len());
    (start.min(pos), end.max(pos))
}

/// The word at or just before `pos`, as a half-open `(start, end)` range.
/// A position inside a run of whitespace yields the empty range `(pos, pos)`.
pub fn bounds_of_word(text: &str, pos: usize) -> (usize, usize) {
    let gs = graphemes(text);
    let len = gs.len();
    if len == 0 {
        return (pos, pos);
    }
    let mut at = pos.min(len);
    if at == len || (at > 0 && is_whitespace(gs[at])) {
        at -= 1;
    }
    if is_whitespace(gs[at]) {
        return (pos, pos);
    }
    let start = scan(&gs, at, Direction::Backward, is_whitespace).map_or(0, |i| i + 1);
    let end = scan(&gs, at, Direction::Forward, is_whitespace).unwrap_or(len);
    (start, end)
}

/// The start of the word preceding `pos` (the target of a backward word
/// motion). Returns 0 when there is no earlier word.
pub fn next_start_of_word(text: &str, pos: usize) -> usize {
    let gs = graphemes(text);
    let Some(before) = pos.min(gs.len()).checked_sub(1) else {
        return 0;
    };
    let Some(word) = scan(&gs, before, Direction::Backward, is_word) else {
        return 0;
    };
    scan(&gs, word, Direction::Backward, is_whitespace).map_or(0, |i| i + 1)
}

/// The end of the word at or after `pos` (the target of a forward word
/// motion). Returns the text length when the text runs out first.
pub fn end_of_word(text: &str, pos: usize) -> usize {
    let gs = graphemes(text);
    scan(&gs, pos, Direction::Forward, is_word)
        .and_then(|word| scan(&gs, word, Direction::Forward, is_whitespace))
        .unwrap_or(gs.len())
}

/// The start of the next word after `pos`, skipping the rest of the word
/// under `pos`. Returns the text length when there is none.
pub fn start_of_next_word(text: &str, pos: usize) -> usize {
    let gs = graphemes(text);
    scan(&gs, pos, Direction::Forward, is_whitespace)
        .and_then(|space| scan(&gs, space, Direction::Forward, is_word))
        .unwrap_or(gs.len())
}

/// The start of the nearest one-grapheme word at or after `pos`.
pub fn find_single_char_word_right(text: &str, pos: usize) -> Option<usize> {
    let gs = graphemes(text);
    let mut at = pos;
    loop {
        let start = scan(&gs, at, Direction::Forward, is_word)?;
        let (word_start, word_end) = bounds_of_word(text, start);
        if word_end - word_start == 1 {
            return Some(word_start);
        }
        at = word_end;
    }
}

/// The start of the nearest one-grapheme word strictly before `pos`.
pub fn find_single_char_word_left(text: &str, pos: usize) -> Option<usize> {
    let gs = graphemes(text);
    let mut at = pos.checked_sub(1)?;
    loop {
        let start = scan(&gs, at, Direction::Backward, is_word)?;
        let (word_start, word_end) = bounds_of_word(text, start);
        if word_end - word_start == 1 {
            return Some(word_start);
        }
        at = word_start.checked_sub(1)?;
    }
}
