//! Typed sequence buffer for word building.
//!
//! The live "what has been typed so far" state. Each keystroke is stored as
//! one `(match, display)` character pair so the lowercase match key and the
//! case-preserved display string cannot drift apart in length; both views
//! are derived from the same buffer.

/// One keystroke: the lowercase character used for matching and the cased
/// character used for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TypedChar {
    matched: char,
    display: char,
}

/// The in-progress typed/tapped sequence, capped to a sliding window.
///
/// Pushing beyond the window silently drops the oldest pair; that is the
/// rolling 10-character buffer, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedSequence {
    chars: Vec<TypedChar>,
    window: usize,
}

impl TypedSequence {
    /// Create an empty sequence holding at most `window` characters.
    pub fn new(window: usize) -> Self {
        Self {
            chars: Vec::new(),
            window: window.max(1),
        }
    }

    /// Append one keystroke. The match character is lowercased here so the
    /// match key stays normalized no matter what the caller passes.
    pub fn push(&mut self, ch: char, display: char) {
        self.chars.push(TypedChar {
            matched: ch.to_ascii_lowercase(),
            display,
        });
        if self.chars.len() > self.window {
            let overflow = self.chars.len() - self.window;
            self.chars.drain(..overflow);
        }
    }

    /// Discard all history and reseed with a single keystroke (the
    /// dead-end restart: the just-typed character becomes the new seed).
    pub fn restart_with(&mut self, ch: char, display: char) {
        self.chars.clear();
        self.push(ch, display);
    }

    /// Lowercase match key for trie lookups and exact-match checks.
    pub fn match_key(&self) -> String {
        self.chars.iter().map(|c| c.matched).collect()
    }

    /// Case-preserved display string. Always the same length as the match
    /// key.
    pub fn display(&self) -> String {
        self.chars.iter().map(|c| c.display).collect()
    }

    /// Re-case every display character without touching the match key.
    /// Used when caps lock toggles mid-word.
    pub fn recase(&mut self, upper: bool) {
        for c in self.chars.iter_mut() {
            c.display = if upper {
                c.display.to_ascii_uppercase()
            } else {
                c.display.to_ascii_lowercase()
            };
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq_of(s: &str, window: usize) -> TypedSequence {
        let mut seq = TypedSequence::new(window);
        for ch in s.chars() {
            seq.push(ch, ch);
        }
        seq
    }

    #[test]
    fn test_match_key_is_lowercased_display_is_not() {
        let mut seq = TypedSequence::new(10);
        seq.push('C', 'C');
        seq.push('a', 'A');
        seq.push('T', 't');

        assert_eq!(seq.match_key(), "cat");
        assert_eq!(seq.display(), "CAt");
        assert_eq!(seq.match_key().len(), seq.display().len());
    }

    #[test]
    fn test_sliding_window_drops_oldest() {
        let seq = seq_of("abcdefghijkl", 10);
        assert_eq!(seq.match_key(), "cdefghijkl");
        assert_eq!(seq.len(), 10);
    }

    #[test]
    fn test_recase_round_trip() {
        let mut seq = seq_of("cat", 10);
        let before = seq.display();

        seq.recase(true);
        assert_eq!(seq.display(), "CAT");
        assert_eq!(seq.match_key(), "cat");

        seq.recase(false);
        assert_eq!(seq.display(), before);
        assert_eq!(seq.match_key(), "cat");
    }

    #[test]
    fn test_restart_with_keeps_only_seed() {
        let mut seq = seq_of("xq", 10);
        seq.restart_with('q', 'Q');
        assert_eq!(seq.match_key(), "q");
        assert_eq!(seq.display(), "Q");
    }
}
