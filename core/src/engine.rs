//! The play engine: key events in, render/animation feeds out.
//!
//! `PlayEngine` composes the corpus, the two builders (keyboard and tap),
//! the word match detector and the timer queue, and routes every input
//! event to the right place. All derived state for one event (match key,
//! display string, suggestions, found word) is committed before the call
//! returns; there is nothing asynchronous except the timers the embedder
//! drives through `tick`.
//!
//! Keys with display text (letters, digits, arrows) participate in the
//! display; digits, arrows and punctuation terminate the typed sequence.
//! Keys without display text are critter shortcuts: Space holds the bear
//! on screen, Backspace/Delete hold the duck, Enter and Tab each launch a
//! fish.

use crate::context::{Critter, Direction, PlayContext, Spawn};
use crate::corpus::Corpus;
use crate::detector::WordDetector;
use crate::key_event::{Key, KeyEvent, KeyResult};
use crate::keyboard::KeyboardEditor;
use crate::settings::Settings;
use crate::tap::TapEditor;
use crate::timers::{TimerAction, TimerQueue};
use crate::Config;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::debug;

/// The engine behind both the desktop and the mobile interaction.
pub struct PlayEngine {
    config: Config,
    corpus: Corpus,
    settings: Settings,
    keyboard: KeyboardEditor,
    tap: TapEditor,
    detector: WordDetector,
    timers: TimerQueue,
    context: PlayContext,
    rng: SmallRng,
}

impl PlayEngine {
    /// Create an engine over `corpus` with OS-seeded randomness.
    pub fn new(corpus: Corpus, config: Config) -> Self {
        let rng = SmallRng::from_os_rng();
        Self::with_rng(corpus, config, rng)
    }

    /// Create an engine with a fixed seed. Spawn counts, stagger delays,
    /// directions and tap offers all become reproducible.
    pub fn with_seed(corpus: Corpus, config: Config, seed: u64) -> Self {
        Self::with_rng(corpus, config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(corpus: Corpus, config: Config, rng: SmallRng) -> Self {
        let keyboard = KeyboardEditor::new(config.window);
        let tap = TapEditor::new(config.window);
        Self {
            corpus,
            settings: Settings::default(),
            keyboard,
            tap,
            detector: WordDetector::new(),
            timers: TimerQueue::new(),
            context: PlayContext::new(),
            rng,
            config,
        }
    }

    /// Apply persisted settings (rebuilds the trie when the name flag
    /// differs from the corpus's current state).
    pub fn apply_settings(&mut self, settings: Settings) {
        self.set_include_names(settings.include_names);
        self.set_show_next_letters(settings.show_next_letters);
    }

    /// Process one key press. `now_ms` is the embedder's monotonic clock.
    pub fn process_key(&mut self, event: KeyEvent, now_ms: u64) -> KeyResult {
        match event.key {
            Key::CapsLock => {
                self.keyboard.set_caps_lock(event.caps_lock);
                if !self.keyboard.is_empty() {
                    self.context.display = self.keyboard.display();
                }
                self.sync_next_letters();
                return KeyResult::Handled;
            }
            Key::Space => {
                if !event.repeat {
                    self.context.bear_visible = true;
                }
                return KeyResult::Handled;
            }
            Key::Backspace | Key::Delete => {
                if !event.repeat {
                    self.context.duck_visible = true;
                }
                return KeyResult::Handled;
            }
            Key::Enter => {
                self.context.spawns.push(Spawn {
                    critter: Critter::Fish,
                    direction: Direction::Ltr,
                    delay_ms: 0,
                });
                return KeyResult::Handled;
            }
            Key::Tab => {
                self.context.spawns.push(Spawn {
                    critter: Critter::Fish,
                    direction: Direction::Rtl,
                    delay_ms: 0,
                });
                return KeyResult::Handled;
            }
            _ => {}
        }

        if event.is_letter() {
            let Key::Char(ch) = event.key else {
                return KeyResult::NotHandled;
            };
            // Keep the display casing in step with the event's modifier
            // state before admitting the letter.
            self.keyboard.set_caps_lock(event.caps_lock);
            if self.context.has_found_word() {
                self.detector.clear_found(&mut self.timers, &mut self.context);
            }

            let outcome = self.keyboard.handle_letter(ch, &self.corpus);
            if outcome.restarted {
                debug!(seed = %self.keyboard.match_key(), "typed history discarded");
            }
            let key = self.keyboard.match_key();
            self.detector.check(
                &key,
                &self.corpus,
                &self.config,
                &mut self.rng,
                &mut self.timers,
                &mut self.context,
                now_ms,
            );

            self.context.display = self.keyboard.display();
            self.sync_next_letters();
            return KeyResult::Handled;
        }

        // Display-only keys (digits, arrows) terminate the sequence.
        if let Some(text) = event.display_text() {
            self.keyboard.clear();
            self.context.display = text;
            self.context.next_letters.clear();
            return KeyResult::Handled;
        }

        // Punctuation puts nothing on screen but still terminates.
        if matches!(event.key, Key::Char(_)) {
            self.keyboard.clear();
            self.context.display.clear();
            self.context.next_letters.clear();
            return KeyResult::Handled;
        }

        KeyResult::NotHandled
    }

    /// Process a key release (held-critter shortcuts end here).
    pub fn release_key(&mut self, key: Key) {
        match key {
            Key::Space => self.context.bear_visible = false,
            Key::Backspace | Key::Delete => self.context.duck_visible = false,
            _ => {}
        }
    }

    /// Mobile: a tap on empty space offers up to three letters.
    pub fn blank_tap(&mut self, _now_ms: u64) {
        self.tap
            .blank_tap(&self.corpus, &mut self.rng, self.config.offered_letters);
        self.context.offered_letters = self.tap.offered();
        self.context.tap_sequence = self.tap.display();
    }

    /// Mobile: a tap on one of the offered letters.
    pub fn letter_tap(&mut self, ch: char, now_ms: u64) {
        let outcome = self.tap.letter_tap(ch, &self.corpus);
        self.context.offered_letters.clear();
        self.context.tap_sequence = self.tap.display();

        if let Some(word) = outcome.completed {
            // The finished sequence goes on screen even before the corpus
            // scan; the detector then decides whether the full lifecycle
            // (history, critters, fade chain) runs.
            self.context.found_word = word.clone();
            self.context.word_fading = false;
            self.detector.check(
                &word,
                &self.corpus,
                &self.config,
                &mut self.rng,
                &mut self.timers,
                &mut self.context,
                now_ms,
            );
            self.timers
                .schedule(now_ms, self.config.tap_reset_ms, TimerAction::TapReset);
        }
    }

    /// Fire every timer that has come due. The embedder calls this from
    /// its event loop with the same monotonic clock it passes everywhere
    /// else.
    pub fn tick(&mut self, now_ms: u64) {
        for action in self.timers.pop_due(now_ms) {
            match action {
                TimerAction::TapReset => {
                    self.tap.reset();
                    self.context.tap_sequence.clear();
                    self.context.offered_letters.clear();
                    // Drops the fade chain too; the word is gone either way.
                    self.detector.clear_found(&mut self.timers, &mut self.context);
                }
                other => self.detector.handle_timer(
                    other,
                    &self.config,
                    &mut self.timers,
                    &mut self.context,
                    now_ms,
                ),
            }
        }
    }

    /// Toggle the name list. Rebuilds the trie and resets both live
    /// sequences in the same call, so no later query ever runs against a
    /// stale trie.
    pub fn set_include_names(&mut self, include: bool) {
        if self.corpus.include_names() == include {
            self.settings.include_names = include;
            return;
        }
        self.corpus.set_include_names(include);
        self.settings.include_names = include;
        self.keyboard.clear();
        self.tap.reset();
        self.context.next_letters.clear();
        self.context.offered_letters.clear();
        self.context.tap_sequence.clear();
    }

    /// Toggle the next-letter suggestion display.
    pub fn set_show_next_letters(&mut self, show: bool) {
        self.settings.show_next_letters = show;
        self.sync_next_letters();
    }

    fn sync_next_letters(&mut self) {
        self.context.next_letters = if self.settings.show_next_letters {
            self.keyboard.next_letters()
        } else {
            Vec::new()
        };
    }

    /// Render/animation feed for the frontend.
    pub fn context(&self) -> &PlayContext {
        &self.context
    }

    /// Mutable access, mainly for draining spawns.
    pub fn context_mut(&mut self) -> &mut PlayContext {
        &mut self.context
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Pending timers, exposed for tests and diagnostics.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }
}
