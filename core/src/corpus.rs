//! Word corpus: the word and name lists behind the recognizer.
//!
//! The corpus owns the prefix trie built from the active word list and is
//! the authoritative exact-word predicate (a case-insensitive linear scan,
//! not a trie lookup). Toggling `include_names` rebuilds the trie in place;
//! rebuild cost is O(total characters), cheap enough to run synchronously
//! inside a settings change.

use crate::trie::TrieNode;
use tracing::debug;

/// Built-in word list. Small, concrete, toddler-friendly vocabulary; the
/// critter words ("fish", "bear", "duck", "horse") must stay present for
/// the detector's spawn triggers to be reachable.
pub const WORDS: &[&str] = &[
    "cat", "dog", "fish", "bear", "duck", "horse", "cow", "pig", "sheep", "frog", "bird", "bug",
    "ant", "bee", "owl", "fox", "hen", "mouse", "goat", "lion", "ball", "book", "car", "bus",
    "boat", "train", "bike", "moon", "star", "sun", "sky", "rain", "snow", "tree", "leaf",
    "flower", "grass", "mama", "dada", "baby", "milk", "cup", "spoon", "apple", "banana", "egg",
    "cake", "hat", "sock", "shoe", "bed", "bath", "door", "house", "red", "blue", "green",
    "yellow", "one", "two", "three", "big", "little", "hi", "yes", "no", "wow", "quack",
];

/// Built-in name list, merged into the corpus when `include_names` is on.
pub const NAMES: &[&str] = &[
    "emma", "liam", "noah", "olivia", "mia", "lucas", "sophia", "jack", "lily", "henry", "ruby",
    "sam", "leo", "zoe", "max", "ella",
];

/// The combined word/name corpus plus its prefix trie.
#[derive(Debug)]
pub struct Corpus {
    words: Vec<String>,
    names: Vec<String>,
    include_names: bool,
    trie: TrieNode,
}

impl Corpus {
    /// Build a corpus from caller-supplied lists. Names start excluded.
    pub fn new<W, N>(words: W, names: N) -> Self
    where
        W: IntoIterator,
        W::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        let mut corpus = Self {
            words: words.into_iter().map(Into::into).collect(),
            names: names.into_iter().map(Into::into).collect(),
            include_names: false,
            trie: TrieNode::new(),
        };
        corpus.rebuild();
        corpus
    }

    /// Build a corpus from the built-in word and name lists.
    pub fn with_defaults() -> Self {
        Self::new(WORDS.iter().copied(), NAMES.iter().copied())
    }

    /// Whether names currently participate in matching.
    pub fn include_names(&self) -> bool {
        self.include_names
    }

    /// Include or exclude the name list, rebuilding the trie when the flag
    /// actually changes.
    pub fn set_include_names(&mut self, include: bool) {
        if self.include_names != include {
            self.include_names = include;
            self.rebuild();
        }
    }

    /// Case-insensitive exact membership check against the active list.
    ///
    /// This linear scan is the authoritative "is this a real word"
    /// predicate; the trie never answers that question.
    pub fn contains(&self, sequence: &str) -> bool {
        let lower = sequence.to_lowercase();
        self.active_words().any(|w| w.to_lowercase() == lower)
    }

    /// Whether at least one active word starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.trie.contains_prefix(prefix)
    }

    /// Possible continuations of `prefix`, per the trie.
    pub fn next_chars(&self, prefix: &str) -> Vec<char> {
        self.trie.next_chars(prefix)
    }

    /// First letters of every active word.
    pub fn root_chars(&self) -> Vec<char> {
        self.trie.root_chars()
    }

    /// Iterate the active word list (words, then names when included).
    pub fn active_words(&self) -> impl Iterator<Item = &str> {
        let names = if self.include_names {
            self.names.as_slice()
        } else {
            &[]
        };
        self.words.iter().chain(names.iter()).map(String::as_str)
    }

    /// Number of active entries.
    pub fn len(&self) -> usize {
        self.words.len() + if self.include_names { self.names.len() } else { 0 }
    }

    /// True when the active list is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rebuild(&mut self) {
        let mut trie = TrieNode::new();
        for word in self.words.iter() {
            trie.insert(word);
        }
        if self.include_names {
            for name in self.names.iter() {
                trie.insert(name);
            }
        }
        self.trie = trie;
        debug!(
            entries = self.len(),
            include_names = self.include_names,
            "rebuilt corpus trie"
        );
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::with_defaults()
    }
}
