//! Play context for frontend communication.
//!
//! A plain data container with public fields: after each engine call the
//! frontend reads these to update the screen. No callbacks, no traits; the
//! render feed and the animation trigger feed are just fields, and the
//! spawn queue is drained with `take_spawns`.

/// Travel direction for an animated critter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left to right across the screen.
    Ltr,
    /// Right to left.
    Rtl,
}

/// Which critter a spawn request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Critter {
    Fish,
    Horse,
}

/// One animation spawn request. `delay_ms` is the stagger before the
/// frontend should start the animation (0 for immediate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub critter: Critter,
    pub direction: Direction,
    pub delay_ms: u64,
}

/// Everything the frontend needs to render after an engine call.
///
/// # Fields
///
/// - `display`: the big on-screen text (typed sequence, digit, or arrow label)
/// - `next_letters`: suggested continuations, cased per caps-lock state
/// - `found_word` / `word_fading`: the found-word lifecycle state
/// - `typed_words`: matched-word history, most recent first, unbounded
/// - `tap_sequence` / `offered_letters`: mobile tap builder state (uppercase)
/// - `bear_visible` / `duck_visible`: sprite visibility windows
/// - `spawns`: pending fish/horse spawn requests (consume with `take_spawns`)
#[derive(Debug, Clone, Default)]
pub struct PlayContext {
    pub display: String,
    pub next_letters: Vec<char>,
    pub found_word: String,
    pub word_fading: bool,
    pub typed_words: Vec<String>,
    pub tap_sequence: String,
    pub offered_letters: Vec<char>,
    pub bear_visible: bool,
    pub duck_visible: bool,
    pub spawns: Vec<Spawn>,
}

impl PlayContext {
    /// Create a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending spawn requests, leaving the queue empty.
    pub fn take_spawns(&mut self) -> Vec<Spawn> {
        std::mem::take(&mut self.spawns)
    }

    /// Whether a found word is currently on screen.
    pub fn has_found_word(&self) -> bool {
        !self.found_word.is_empty()
    }
}
