//! Desktop keyboard-driven sequence state machine.
//!
//! Owns the typed sequence and applies the per-letter admission policy:
//! append (with the sliding window), then either keep the candidate or, on
//! a dead end, restart with the just-typed letter as the new seed. The
//! machine consults the corpus trie for continuations but never decides
//! "is a word" itself beyond what the restart policy needs; the detector
//! owns the found-word lifecycle.

use crate::corpus::Corpus;
use crate::sequence::TypedSequence;
use tracing::debug;

/// Observable state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    /// Nothing typed yet (or cleared by a non-letter key).
    Empty,
    /// A sequence is in progress and is not an exact corpus match.
    Building,
    /// The current sequence exactly matches a corpus entry. The next
    /// letter continues from it; the window and dead-end policy take care
    /// of the rest.
    Completed,
}

/// What one letter did to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterOutcome {
    /// The sequence dead-ended and was reseeded with this letter.
    pub restarted: bool,
    /// The resulting sequence is an exact corpus match.
    pub completed: Option<String>,
}

/// Keyboard-driven word builder.
#[derive(Debug)]
pub struct KeyboardEditor {
    seq: TypedSequence,
    next_letters: Vec<char>,
    caps_lock: bool,
    completed: bool,
}

impl KeyboardEditor {
    /// Create an empty machine with the given sliding-window size.
    pub fn new(window: usize) -> Self {
        Self {
            seq: TypedSequence::new(window),
            next_letters: Vec::new(),
            caps_lock: false,
            completed: false,
        }
    }

    /// Feed one letter through the admission/restart policy.
    ///
    /// The candidate is the current sequence plus the letter, truncated to
    /// the window. A candidate that has no continuation, is longer than one
    /// character and is not itself a word is unrecoverable: all history is
    /// discarded and the letter seeds a fresh sequence. Otherwise the
    /// candidate stands, even when it has no continuations because it is a
    /// finished word.
    pub fn handle_letter(&mut self, ch: char, corpus: &Corpus) -> LetterOutcome {
        let display = if self.caps_lock {
            ch.to_ascii_uppercase()
        } else {
            ch.to_ascii_lowercase()
        };

        self.seq.push(ch, display);
        let mut key = self.seq.match_key();
        let mut is_complete = corpus.contains(&key);
        let mut next = corpus.next_chars(&key);
        let mut restarted = false;

        if next.is_empty() && key.chars().count() > 1 && !is_complete {
            debug!(dead_end = %key, "sequence dead-ended, reseeding");
            self.seq.restart_with(ch, display);
            key = self.seq.match_key();
            is_complete = corpus.contains(&key);
            next = corpus.next_chars(&key);
            restarted = true;
        }

        self.next_letters = next;
        self.completed = is_complete;
        LetterOutcome {
            restarted,
            completed: is_complete.then_some(key),
        }
    }

    /// Current state per the Empty/Building/Completed machine.
    pub fn state(&self) -> SequenceState {
        if self.seq.is_empty() {
            SequenceState::Empty
        } else if self.completed {
            SequenceState::Completed
        } else {
            SequenceState::Building
        }
    }

    /// Sync the caps-lock state, re-casing the display string in place.
    /// The match key is never touched and progress is kept.
    pub fn set_caps_lock(&mut self, on: bool) {
        if self.caps_lock != on {
            self.caps_lock = on;
            self.seq.recase(on);
        }
    }

    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// Lowercase match key of the in-progress sequence.
    pub fn match_key(&self) -> String {
        self.seq.match_key()
    }

    /// Case-preserved display string of the in-progress sequence.
    pub fn display(&self) -> String {
        self.seq.display()
    }

    /// Continuation suggestions, cased to match the display string.
    pub fn next_letters(&self) -> Vec<char> {
        self.next_letters
            .iter()
            .map(|c| {
                if self.caps_lock {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Terminate the sequence unconditionally (non-letter key).
    pub fn clear(&mut self) {
        self.seq.clear();
        self.next_letters.clear();
        self.completed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Corpus {
        Corpus::new(["cat", "car", "bear", "quack"], Vec::<String>::new())
    }

    fn type_word(editor: &mut KeyboardEditor, corpus: &Corpus, word: &str) -> LetterOutcome {
        let mut last = LetterOutcome {
            restarted: false,
            completed: None,
        };
        for ch in word.chars() {
            last = editor.handle_letter(ch, corpus);
        }
        last
    }

    #[test]
    fn test_building_exposes_continuations() {
        let corpus = corpus();
        let mut editor = KeyboardEditor::new(10);
        type_word(&mut editor, &corpus, "ca");

        assert_eq!(editor.state(), SequenceState::Building);
        assert_eq!(editor.match_key(), "ca");
        let mut next = editor.next_letters();
        next.sort();
        assert_eq!(next, vec!['r', 't']);
    }

    #[test]
    fn test_completion_after_full_word() {
        let corpus = corpus();
        let mut editor = KeyboardEditor::new(10);
        let outcome = type_word(&mut editor, &corpus, "cat");

        assert_eq!(outcome.completed.as_deref(), Some("cat"));
        assert_eq!(editor.state(), SequenceState::Completed);
    }

    #[test]
    fn test_dead_end_reseeds_with_last_letter() {
        let corpus = corpus();
        let mut editor = KeyboardEditor::new(10);
        // "x" is admitted as a fresh seed even though nothing starts with
        // it (candidate length 1 never restarts).
        editor.handle_letter('x', &corpus);
        assert_eq!(editor.match_key(), "x");

        // "xq" dead-ends; "q" alone is a prefix of "quack" and becomes the
        // new seed. History is discarded, not the whole sequence.
        let outcome = editor.handle_letter('q', &corpus);
        assert!(outcome.restarted);
        assert_eq!(editor.match_key(), "q");
        assert_eq!(editor.state(), SequenceState::Building);
        assert_eq!(editor.next_letters(), vec!['u']);
    }

    #[test]
    fn test_completed_word_with_no_continuation_is_kept() {
        let corpus = corpus();
        let mut editor = KeyboardEditor::new(10);
        let outcome = type_word(&mut editor, &corpus, "quack");

        // No continuations exist, but the sequence is a word: no restart.
        assert!(!outcome.restarted);
        assert_eq!(outcome.completed.as_deref(), Some("quack"));
        assert_eq!(editor.match_key(), "quack");
        assert!(editor.next_letters().is_empty());
    }

    #[test]
    fn test_caps_lock_recases_display_only() {
        let corpus = corpus();
        let mut editor = KeyboardEditor::new(10);
        type_word(&mut editor, &corpus, "ca");

        editor.set_caps_lock(true);
        assert_eq!(editor.display(), "CA");
        assert_eq!(editor.match_key(), "ca");
        assert_eq!(editor.next_letters().len(), 2);
        assert!(editor.next_letters().iter().all(|c| c.is_ascii_uppercase()));

        editor.set_caps_lock(false);
        assert_eq!(editor.display(), "ca");
        assert_eq!(editor.match_key(), "ca");
    }

    #[test]
    fn test_sliding_window_applies_before_policy() {
        let corpus = Corpus::new(["xabcdefghi", "abcdefghij"], Vec::<String>::new());
        let mut editor = KeyboardEditor::new(10);
        // Eleven letters: the leading "x" falls off the window, and the
        // remaining ten characters are judged as the candidate.
        let outcome = type_word(&mut editor, &corpus, "xabcdefghij");
        assert!(!outcome.restarted);
        assert_eq!(outcome.completed.as_deref(), Some("abcdefghij"));
        assert_eq!(editor.match_key(), "abcdefghij");
    }
}
