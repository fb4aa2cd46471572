//! Word match detection and the found-word lifecycle.
//!
//! Given a finalized sequence, decide whether it exactly matches a corpus
//! entry and, if so, run the found-word lifecycle: show the word, hold it,
//! fade it, clear it, and fire the critter triggers for the special words.
//! Matching is exact equality only; prefixes and suffixes never trigger.
//!
//! Every scheduled dismissal is held as a `TimerId` on this struct, so a
//! new match (or a keystroke clearing the display) cancels the previous
//! chain instead of letting it fire against a superseded word.

use crate::context::{Critter, Direction, PlayContext, Spawn};
use crate::corpus::Corpus;
use crate::timers::{TimerAction, TimerId, TimerQueue};
use crate::Config;
use rand::rngs::SmallRng;
use rand::Rng;
use tracing::{debug, info};

/// Pick a travel direction with the configured left-to-right bias.
pub(crate) fn random_direction(rng: &mut SmallRng, ltr_bias: f64) -> Direction {
    if rng.random_bool(ltr_bias) {
        Direction::Ltr
    } else {
        Direction::Rtl
    }
}

/// Exact-match word detector plus found-word dismissal bookkeeping.
#[derive(Debug, Default)]
pub struct WordDetector {
    fade_timer: Option<TimerId>,
    clear_timer: Option<TimerId>,
    bear_timer: Option<TimerId>,
    duck_timer: Option<TimerId>,
}

impl WordDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `sequence` against the corpus and run the lifecycle on a match.
    ///
    /// No match is a silent no-op. On a match the previous dismissal chain
    /// is canceled, the found word replaces whatever was showing, the word
    /// joins the history, critter triggers fire, and a fresh hold timer
    /// starts.
    ///
    /// Returns true when a word was found.
    pub fn check(
        &mut self,
        sequence: &str,
        corpus: &Corpus,
        config: &Config,
        rng: &mut SmallRng,
        timers: &mut TimerQueue,
        ctx: &mut PlayContext,
        now_ms: u64,
    ) -> bool {
        if !corpus.contains(sequence) {
            return false;
        }
        let found = sequence.to_lowercase();

        self.cancel_dismissal(timers);
        ctx.found_word = found.clone();
        ctx.word_fading = false;
        ctx.typed_words.insert(0, found.clone());
        info!(word = %found, "word matched");

        match found.as_str() {
            "fish" => {
                let count = rng.random_range(config.fish_min..=config.fish_max);
                for _ in 0..count {
                    let delay_ms = rng.random_range(0..config.fish_stagger_ms);
                    let direction = random_direction(rng, config.ltr_bias);
                    ctx.spawns.push(Spawn {
                        critter: Critter::Fish,
                        direction,
                        delay_ms,
                    });
                }
                debug!(count, "spawning fish school");
            }
            "bear" => {
                if let Some(id) = self.bear_timer.take() {
                    timers.cancel(id);
                }
                ctx.bear_visible = true;
                self.bear_timer =
                    Some(timers.schedule(now_ms, config.critter_hold_ms, TimerAction::BearHide));
            }
            "duck" => {
                if let Some(id) = self.duck_timer.take() {
                    timers.cancel(id);
                }
                ctx.duck_visible = true;
                self.duck_timer =
                    Some(timers.schedule(now_ms, config.critter_hold_ms, TimerAction::DuckHide));
            }
            "horse" => {
                let direction = random_direction(rng, config.ltr_bias);
                ctx.spawns.push(Spawn {
                    critter: Critter::Horse,
                    direction,
                    delay_ms: 0,
                });
            }
            _ => {}
        }

        self.fade_timer = Some(timers.schedule(now_ms, config.word_hold_ms, TimerAction::WordFade));
        true
    }

    /// Apply a due timer action. Called from `PlayEngine::tick`.
    pub fn handle_timer(
        &mut self,
        action: TimerAction,
        config: &Config,
        timers: &mut TimerQueue,
        ctx: &mut PlayContext,
        now_ms: u64,
    ) {
        match action {
            TimerAction::WordFade => {
                self.fade_timer = None;
                ctx.word_fading = true;
                self.clear_timer =
                    Some(timers.schedule(now_ms, config.word_fade_ms, TimerAction::WordClear));
            }
            TimerAction::WordClear => {
                self.clear_timer = None;
                ctx.found_word.clear();
                ctx.word_fading = false;
            }
            TimerAction::BearHide => {
                self.bear_timer = None;
                ctx.bear_visible = false;
            }
            TimerAction::DuckHide => {
                self.duck_timer = None;
                ctx.duck_visible = false;
            }
            // The tap reset belongs to the engine, which owns the builder.
            TimerAction::TapReset => {}
        }
    }

    /// Clear the found word right now (a new keystroke superseded it) and
    /// drop its pending dismissal so nothing fires later.
    pub fn clear_found(&mut self, timers: &mut TimerQueue, ctx: &mut PlayContext) {
        self.cancel_dismissal(timers);
        ctx.found_word.clear();
        ctx.word_fading = false;
    }

    fn cancel_dismissal(&mut self, timers: &mut TimerQueue) {
        if let Some(id) = self.fade_timer.take() {
            timers.cancel(id);
        }
        if let Some(id) = self.clear_timer.take() {
            timers.cancel(id);
        }
    }
}
