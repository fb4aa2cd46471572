//! Mobile tap-driven word builder.
//!
//! The alternate driver for the same trie machinery: instead of free-form
//! keystrokes, the toddler taps the blank screen to get up to three letter
//! choices, all drawn from the trie's valid continuations. Dead ends are
//! structurally impossible here, so there is no restart branch; a sequence
//! ends when it runs out of continuations or exactly matches a word.

use crate::corpus::Corpus;
use crate::sequence::TypedSequence;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// What a letter tap concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapOutcome {
    /// The sequence is finished: no continuations remain, or it exactly
    /// matches a corpus entry. The engine displays it and schedules the
    /// auto-reset.
    pub completed: Option<String>,
}

/// Tap-driven word builder. Display convention is uppercase.
#[derive(Debug)]
pub struct TapEditor {
    seq: TypedSequence,
    offered: Vec<char>,
}

impl TapEditor {
    pub fn new(window: usize) -> Self {
        Self {
            seq: TypedSequence::new(window),
            offered: Vec::new(),
        }
    }

    /// A tap on empty space: offer up to `max_offered` shuffled letters
    /// drawn from the valid continuations of the in-progress sequence (or
    /// from the trie roots when nothing is in progress). No valid letters
    /// means no-op and an empty offer.
    pub fn blank_tap(
        &mut self,
        corpus: &Corpus,
        rng: &mut SmallRng,
        max_offered: usize,
    ) -> &[char] {
        let mut possible = if self.seq.is_empty() {
            corpus.root_chars()
        } else {
            corpus.next_chars(&self.seq.match_key())
        };
        if possible.is_empty() {
            self.offered.clear();
            return &self.offered;
        }
        possible.shuffle(rng);
        possible.truncate(max_offered);
        self.offered = possible;
        &self.offered
    }

    /// A tap on one of the offered letters: append it, withdraw the offer
    /// and decide whether the word is finished.
    pub fn letter_tap(&mut self, ch: char, corpus: &Corpus) -> TapOutcome {
        self.seq.push(ch, ch.to_ascii_uppercase());
        self.offered.clear();

        let key = self.seq.match_key();
        let next = corpus.next_chars(&key);
        let completed = next.is_empty() || corpus.contains(&key);
        TapOutcome {
            completed: completed.then_some(key),
        }
    }

    /// Letters currently offered for tapping (uppercased for display).
    pub fn offered(&self) -> Vec<char> {
        self.offered
            .iter()
            .map(|c| c.to_ascii_uppercase())
            .collect()
    }

    /// Uppercase display string of the in-progress sequence.
    pub fn display(&self) -> String {
        self.seq.display()
    }

    /// Lowercase match key of the in-progress sequence.
    pub fn match_key(&self) -> String {
        self.seq.match_key()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Drop the sequence and any standing offer (auto-reset, corpus change).
    pub fn reset(&mut self) {
        self.seq.clear();
        self.offered.clear();
    }
}
