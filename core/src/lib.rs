//! keysmash-core
//!
//! Word recognition engine for a keyboard-reactive toddler toy: keypresses
//! (or taps on mobile) build a typed sequence against a prefix trie, exact
//! matches against the word/name corpus trigger a found-word display
//! lifecycle, and a few special words launch critters across the screen.
//!
//! The crate is frontend-agnostic: input arrives as normalized `KeyEvent`s
//! or tap calls, output is read back from a plain-data `PlayContext`, and
//! time is whatever monotonic millisecond clock the embedder passes in.
//!
//! Public API:
//! - `PlayEngine` - composes everything; the only type most frontends need
//! - `Corpus` / `TrieNode` - word lists and the prefix tree over them
//! - `KeyboardEditor` / `TapEditor` - the two sequence builders
//! - `WordDetector` - exact-match detection and the found-word lifecycle
//! - `PlayContext` - render feed and animation trigger feed
//! - `Settings` / `SettingsStore` - the two persisted preferences
//! - `Config` - tunable timings and counts
use serde::{Deserialize, Serialize};

pub mod trie;
pub use trie::TrieNode;

pub mod corpus;
pub use corpus::{Corpus, NAMES, WORDS};

pub mod sequence;
pub use sequence::TypedSequence;

pub mod key_event;
pub use key_event::{Key, KeyEvent, KeyResult};

pub mod keyboard;
pub use keyboard::{KeyboardEditor, LetterOutcome, SequenceState};

pub mod tap;
pub use tap::{TapEditor, TapOutcome};

pub mod detector;
pub use detector::WordDetector;

pub mod timers;
pub use timers::{TimerAction, TimerId, TimerQueue};

pub mod context;
pub use context::{Critter, Direction, PlayContext, Spawn};

pub mod engine;
pub use engine::PlayEngine;

pub mod settings;
pub use settings::{JsonFileStore, MemoryStore, Settings, SettingsStore};

/// Tunable timings and counts for the play engine.
///
/// The defaults reproduce the shipped behavior; everything is exposed so a
/// frontend (or a test) can speed the lifecycle up or calm the fish down.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// How long a found word stays fully visible before fading (ms).
    pub word_hold_ms: u64,
    /// How long the fade-out runs before the word is cleared (ms).
    pub word_fade_ms: u64,
    /// Visibility window for the bear/duck sprites after their word (ms).
    pub critter_hold_ms: u64,
    /// Delay before the mobile builder auto-resets a finished word (ms).
    pub tap_reset_ms: u64,
    /// Fish school size bounds for a "fish" match (inclusive).
    pub fish_min: usize,
    pub fish_max: usize,
    /// Upper bound (exclusive) on the per-fish start stagger (ms).
    pub fish_stagger_ms: u64,
    /// Probability a spawned critter travels left-to-right.
    pub ltr_bias: f64,
    /// Sliding-window cap on retained typed history (characters).
    pub window: usize,
    /// Maximum letters offered per blank tap on mobile.
    pub offered_letters: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_hold_ms: 6000,
            word_fade_ms: 500,
            critter_hold_ms: 2000,
            tap_reset_ms: 2000,
            fish_min: 6,
            fish_max: 10,
            fish_stagger_ms: 600,
            ltr_bias: 0.85,
            window: 10,
            offered_letters: 3,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject field combinations a hand-edited file can produce but the
    /// engine cannot run with (empty sample ranges, out-of-range
    /// probabilities).
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.fish_min <= self.fish_max,
            "fish_min ({}) exceeds fish_max ({})",
            self.fish_min,
            self.fish_max
        );
        anyhow::ensure!(self.fish_stagger_ms >= 1, "fish_stagger_ms must be at least 1");
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.ltr_bias),
            "ltr_bias ({}) must be within 0.0..=1.0",
            self.ltr_bias
        );
        anyhow::ensure!(self.window >= 1, "window must be at least 1");
        anyhow::ensure!(self.offered_letters >= 1, "offered_letters must be at least 1");
        Ok(())
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_toml_round_trip() {
        let mut config = Config::default();
        config.word_hold_ms = 1234;
        config.ltr_bias = 0.5;

        let text = config.to_toml_string().unwrap();
        let back = Config::from_toml_str(&text).unwrap();
        assert_eq!(back.word_hold_ms, 1234);
        assert_eq!(back.word_fade_ms, 500);
        assert!((back.ltr_bias - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_degenerate_fields() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.fish_min = 9;
        config.fish_max = 2;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.fish_stagger_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ltr_bias = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_toml_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keysmash.toml");

        let mut config = Config::default();
        config.ltr_bias = -0.2;
        config.save_toml(&path).unwrap();
        assert!(Config::load_toml(&path).is_err());

        Config::default().save_toml(&path).unwrap();
        assert!(Config::load_toml(&path).is_ok());
    }

    #[test]
    fn test_default_timings_match_shipped_behavior() {
        let config = Config::default();
        assert_eq!(config.word_hold_ms, 6000);
        assert_eq!(config.word_fade_ms, 500);
        assert_eq!(config.critter_hold_ms, 2000);
        assert_eq!(config.tap_reset_ms, 2000);
        assert_eq!(config.fish_min, 6);
        assert_eq!(config.fish_max, 10);
        assert_eq!(config.window, 10);
    }
}
