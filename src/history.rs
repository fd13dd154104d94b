//!

use camino::Utf8Path;
use crate::error::LineBlockResult;
use itertools::Itertools;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};

/// An append-only log of committed lines, with a read cursor for
/// walking it.
#[derive(Clone, Default, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct History {
    entries: Vec<String>,
    #[serde(skip)]
    cursor: Option<HistIdx>,
}

impl History {
    pub fn new(entries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut history = Self::default();
        history.set_entries(entries);
        history
    }

    pub fn read_from_file(filepath: impl AsRef<Utf8Path>) -> LineBlockResult<Self> {
        let filepath = filepath.as_ref();
        if !filepath.exists() {
            return Ok(Self::default());
        }
        let mut contents = String::with_capacity(8 * 1024);
        let read_bytes = File::open(filepath)?.read_to_string(&mut contents)?;
        if read_bytes == 0 { // empty file
            Ok(Self::default())
        } else {
            let mut history = serde_json::from_str::<Self>(&contents)?;
            history.cursor = history.max_idx();
            Ok(history)
        }
    }

    pub fn write_to_file(&self, path: impl AsRef<Utf8Path>) -> LineBlockResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(path.as_ref())?;
        let json: String = serde_json::to_string_pretty(&self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Append `entry` and point the cursor at it.
    pub fn append_entry(&mut self, entry: impl Into<String>) -> HistIdx {
        let idx = HistIdx(self.entries.len());
        self.entries.push(entry.into());
        self.cursor = Some(idx);
        idx
    }

    /// Replace every entry. The cursor points at the new last entry.
    pub fn set_entries(&mut self, entries: impl IntoIterator<Item = impl Into<String>>) {
        self.entries = entries.into_iter().map(Into::into).collect();
        self.cursor = self.max_idx();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, idx: HistIdx) -> Option<&str> {
        self.entries.get(idx.0).map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_idx(&self) -> Option<HistIdx> {
        self.entries.len().checked_sub(1).map(HistIdx)
    }

    pub fn cursor(&self) -> Option<HistIdx> {
        self.cursor
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Option<&str> {
        self.get(self.cursor?)
    }

    pub fn try_move_up(&mut self) -> Option<&str> {
        let cursor = self.cursor.filter(|idx| idx.0 > 0)?;
        self.move_to(cursor - 1)
    }

    pub fn try_move_down(&mut self) -> Option<&str> {
        let cursor = self.cursor?;
        if Some(cursor) >= self.max_idx() {
            return None;
        }
        self.move_to(cursor + 1)
    }

    pub fn try_move_first(&mut self) -> Option<&str> {
        self.move_to(HistIdx(0))
    }

    pub fn try_move_last(&mut self) -> Option<&str> {
        self.move_to(self.max_idx()?)
    }

    fn move_to(&mut self, idx: HistIdx) -> Option<&str> {
        if idx.0 >= self.entries.len() {
            return None;
        }
        log::trace!("history cursor {:?} -> {idx}", self.cursor);
        self.cursor = Some(idx);
        self.get(idx)
    }

    /// The most recent entry satisfying `pred`.
    pub fn find_last(&self, pred: impl Fn(&str) -> bool) -> Option<&str> {
        self.find_last_index(pred).and_then(|idx| self.get(idx))
    }

    pub fn find_last_index(&self, pred: impl Fn(&str) -> bool) -> Option<HistIdx> {
        self.entries.iter().rposition(|entry| pred(entry.as_str())).map(HistIdx)
    }

    /// Drop every entry repeated later in the log, keeping the newest
    /// `limit` entries at most.
    pub fn trim(&mut self, limit: usize) {
        let kept: Vec<String> = self.entries.drain(..)
            .rev()
            .unique() // keep only the newest of each duplicate
            .take(limit)
            .collect();
        self.entries = kept.into_iter().rev().collect();
        self.cursor = self.max_idx();
    }
}

impl std::fmt::Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "History:")?;
        for (idx, entry) in self.entries.iter().enumerate() {
            writeln!(f, "{idx:>4}  {entry}")?;
        }
        Ok(())
    }
}

impl std::ops::Index<HistIdx> for History {
    type Output = str;

    fn index(&self, index: HistIdx) -> &Self::Output {
        &self.entries[index.0]
    }
}


#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Deserialize, serde::Serialize, derive_more::From, derive_more::Display)]
pub struct HistIdx(pub(crate) usize);

impl HistIdx {
    pub fn get(self) -> usize {
        self.0
    }
}

impl std::ops::Add<usize> for HistIdx {
    type Output = Self;

    fn add(self, rhs: usize) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl std::ops::Sub<usize> for HistIdx {
    type Output = Self;

    fn sub(self, rhs: usize) -> Self::Output {
        Self(self.0 - rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use pretty_assertions::assert_eq;

    #[test]
    fn appending_moves_the_cursor_to_the_new_entry() {
        let mut history = History::default();
        assert_eq!(history.cursor(), None);
        history.append_entry("a");
        history.append_entry("b");
        assert_eq!(history.cursor(), Some(HistIdx(1)));
        assert_eq!(history.current(), Some("b"));
    }

    #[test]
    fn walking_up_and_back_down() {
        let mut history = History::default();
        for entry in ["one", "two", "three", "four"] {
            history.append_entry(entry);
        }
        let mut up = vec![];
        while let Some(entry) = history.try_move_up() {
            up.push(entry.to_string());
        }
        assert_eq!(up, vec!["three", "two", "one"]);
        let mut down = vec![];
        while let Some(entry) = history.try_move_down() {
            down.push(entry.to_string());
        }
        assert_eq!(down, vec!["two", "three", "four"]);
    }

    #[test]
    fn moving_in_an_empty_history_fails() {
        let mut history = History::default();
        assert_eq!(history.try_move_up(), None);
        assert_eq!(history.try_move_down(), None);
        assert_eq!(history.try_move_first(), None);
        assert_eq!(history.try_move_last(), None);
    }

    #[test]
    fn first_and_last() {
        let mut history = History::new(["a", "b", "c"]);
        assert_eq!(history.try_move_first(), Some("a"));
        assert_eq!(history.try_move_up(), None);
        assert_eq!(history.try_move_last(), Some("c"));
        assert_eq!(history.try_move_down(), None);
    }

    #[test]
    fn searching_finds_the_most_recent_match() {
        let history = History::new(["git status", "ls", "git stash", "cargo"]);
        assert_eq!(history.find_last_index(|e| e.contains("git")), Some(HistIdx(2)));
        assert_eq!(history.find_last(|e| e.contains("stat")), Some("git status"));
        assert_eq!(history.find_last(|e| e.contains("rm")), None);
    }

    #[test]
    fn trimming_keeps_the_newest_duplicates() {
        let mut history = History::new(["a", "b", "a", "c", "b"]);
        history.trim(10);
        assert_eq!(history.entries(), ["a", "c", "b"]);
        history.trim(2);
        assert_eq!(history.entries(), ["c", "b"]);
    }

    #[test]
    fn persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("history.json")).unwrap();
        assert_eq!(History::read_from_file(&path).unwrap(), History::default());

        let history = History::new(["echo hi", "exit"]);
        history.write_to_file(&path).unwrap();
        let read = History::read_from_file(&path).unwrap();
        assert_eq!(read.entries(), history.entries());
        assert_eq!(read.cursor(), Some(HistIdx(1)));
    }
}
