//! A prefix trie over sequences of ordered elements, used to look up
//! completion candidates.

use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Node<T: Ord> {
    children: BTreeMap<T, Node<T>>,
    terminal: bool,
}

impl<T: Ord> Default for Node<T> {
    fn default() -> Self {
        Self { children: BTreeMap::new(), terminal: false }
    }
}

impl<T: Ord + Clone> Node<T> {
    fn find(&self, prefix: &[T]) -> Option<&Self> {
        match prefix {
            [] => Some(self),
            [first, rest @ ..] => self.children.get(first)?.find(rest),
        }
    }

    /// Unmark `seq` below this node. Returns `None` if `seq` was not
    /// stored, otherwise whether this node is now dead and can be pruned.
    fn remove(&mut self, seq: &[T]) -> Option<bool> {
        match seq {
            [] => {
                if !self.terminal {
                    return None;
                }
                self.terminal = false;
            }
            [first, rest @ ..] => {
                let child = self.children.get_mut(first)?;
                if child.remove(rest)? {
                    self.children.remove(first);
                }
            }
        }
        Some(!self.terminal && self.children.is_empty())
    }

    fn collect_suffixes(&self, suffix: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if self.terminal {
            out.push(suffix.clone());
        }
        for (element, child) in &self.children {
            suffix.push(element.clone());
            child.collect_suffixes(suffix, out);
            suffix.pop();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixTrie<T: Ord> {
    root: Node<T>,
}

impl<T: Ord> Default for PrefixTrie<T> {
    fn default() -> Self {
        Self { root: Node::default() }
    }
}

impl<T: Ord + Clone> PrefixTrie<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        !self.root.terminal && self.root.children.is_empty()
    }

    /// Store `seq`. Storing a sequence twice is the same as storing it once.
    pub fn add(&mut self, seq: impl IntoIterator<Item = T>) {
        let mut node = &mut self.root;
        for element in seq {
            node = node.children.entry(element).or_default();
        }
        node.terminal = true;
    }

    /// Forget `seq`, pruning every node only it was using.
    /// Returns whether `seq` was stored.
    pub fn remove(&mut self, seq: &[T]) -> bool {
        self.root.remove(seq).is_some()
    }

    pub fn contains(&self, seq: &[T]) -> bool {
        self.root.find(seq).is_some_and(|node| node.terminal)
    }

    /// The remainders of every stored sequence that starts with `prefix`,
    /// in element order. A stored `prefix` itself yields an empty remainder.
    pub fn matching_elements(&self, prefix: &[T]) -> Vec<Vec<T>> {
        let mut matches = vec![];
        if let Some(node) = self.root.find(prefix) {
            node.collect_suffixes(&mut vec![], &mut matches);
        }
        matches
    }
}

impl PrefixTrie<char> {
    pub fn add_str(&mut self, s: &str) {
        self.add(s.chars());
    }

    pub fn remove_str(&mut self, s: &str) -> bool {
        self.remove(&s.chars().collect::<Vec<_>>())
    }

    pub fn contains_str(&self, s: &str) -> bool {
        self.contains(&s.chars().collect::<Vec<_>>())
    }

    /// Like [`matching_elements`](Self::matching_elements), as strings.
    pub fn completions_of(&self, prefix: &str) -> Vec<String> {
        let prefix: Vec<char> = prefix.chars().collect();
        self.matching_elements(&prefix)
            .into_iter()
            .map(|suffix| suffix.into_iter().collect())
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixTrie<char> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Self::new();
        for s in iter {
            trie.add_str(s.as_ref());
        }
        trie
    }
}
