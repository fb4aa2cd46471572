/// Prefix trie over the word corpus.
use ahash::AHashMap;

/// A simple Trie (prefix tree) storing every word of the active corpus.
///
/// Used by the sequence state machine to answer "could the typed sequence
/// still become a word?" and "which letters may come next?". The trie is
/// rebuilt wholesale whenever the corpus changes; it is never patched
/// incrementally.
///
/// Nodes carry no terminal marker: a node with no children means "no
/// recorded continuation", not "this is a word". Exact-word checks are the
/// corpus's job (`Corpus::contains`), so `next_chars` returning empty must
/// never be read as a completion signal on its own.
///
/// # Example
/// ```
/// use keysmash_core::trie::TrieNode;
///
/// let mut trie = TrieNode::new();
/// trie.insert("cat");
/// trie.insert("car");
///
/// assert!(trie.contains_prefix("ca"));
/// assert!(!trie.contains_prefix("x"));
///
/// let mut next = trie.next_chars("ca");
/// next.sort();
/// assert_eq!(next, vec!['r', 't']);
/// ```
#[derive(Debug, Default)]
pub struct TrieNode {
    children: AHashMap<char, Box<TrieNode>>,
}

impl TrieNode {
    /// Create a new empty trie root.
    pub fn new() -> Self {
        Self {
            children: AHashMap::new(),
        }
    }

    /// Insert a word into the trie, lowercasing it first.
    pub fn insert(&mut self, word: &str) {
        let mut node = self;
        for ch in word.chars().flat_map(|c| c.to_lowercase()) {
            node = node
                .children
                .entry(ch)
                .or_insert_with(|| Box::new(TrieNode::new()));
        }
    }

    /// Check whether `prefix` leads to a node, i.e. whether at least one
    /// corpus word starts with it. The empty prefix is trivially true.
    ///
    /// Matching is case-insensitive; the prefix is lowercased before the walk.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.walk(prefix).is_some()
    }

    /// All single-character continuations recorded after `prefix`.
    ///
    /// Returns an empty vec when the prefix is not in the trie or when the
    /// reached node is a leaf. The ordering of the result is unspecified;
    /// callers must not rely on it for correctness.
    pub fn next_chars(&self, prefix: &str) -> Vec<char> {
        match self.walk(prefix) {
            Some(node) => node.children.keys().copied().collect(),
            None => Vec::new(),
        }
    }

    /// Characters branching directly off the root (first letters of every
    /// corpus word).
    pub fn root_chars(&self) -> Vec<char> {
        self.children.keys().copied().collect()
    }

    /// Walk to the node for `prefix`, lowercasing on the way.
    fn walk(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = self;
        for ch in prefix.chars().flat_map(|c| c.to_lowercase()) {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}
