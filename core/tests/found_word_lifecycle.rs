// core/tests/found_word_lifecycle.rs
//
// Integration tests for the found-word hold/fade/clear chain and the
// critter triggers: fish schools, the single horse, and the bear/duck
// visibility windows (including re-trigger behavior). Time is driven
// explicitly through PlayEngine::tick, so nothing here sleeps.

use keysmash_core::{Config, Corpus, Critter, Direction, Key, KeyEvent, PlayEngine};

fn engine_seeded(seed: u64) -> PlayEngine {
    PlayEngine::with_seed(Corpus::with_defaults(), Config::default(), seed)
}

fn type_word(engine: &mut PlayEngine, word: &str, now_ms: u64) {
    for ch in word.chars() {
        engine.process_key(KeyEvent::letter(ch), now_ms);
    }
}

#[test]
fn found_word_holds_then_fades_then_clears() {
    let mut engine = engine_seeded(1);
    type_word(&mut engine, "cat", 0);
    assert_eq!(engine.context().found_word, "cat");
    assert!(!engine.context().word_fading);

    engine.tick(5999);
    assert_eq!(engine.context().found_word, "cat");
    assert!(!engine.context().word_fading);

    engine.tick(6000);
    assert_eq!(engine.context().found_word, "cat");
    assert!(engine.context().word_fading);

    engine.tick(6499);
    assert!(engine.context().word_fading);

    engine.tick(6500);
    assert!(engine.context().found_word.is_empty());
    assert!(!engine.context().word_fading);
    assert_eq!(engine.pending_timers(), 0);
}

#[test]
fn new_match_supersedes_previous_dismissal() {
    let mut engine = engine_seeded(1);
    type_word(&mut engine, "cat", 0);

    // Second match restarts the hold; the first word's chain must not
    // fire against the new word.
    type_word(&mut engine, "cat", 4000);
    engine.tick(6500);
    assert_eq!(engine.context().found_word, "cat");
    assert!(!engine.context().word_fading);

    engine.tick(10_000);
    assert!(engine.context().word_fading);
    engine.tick(10_500);
    assert!(engine.context().found_word.is_empty());
}

#[test]
fn keystroke_cancels_pending_dismissal() {
    let mut engine = engine_seeded(1);
    type_word(&mut engine, "cat", 0);
    assert!(engine.pending_timers() > 0);

    engine.process_key(KeyEvent::letter('z'), 100);
    assert!(engine.context().found_word.is_empty());
    // The fade chain is gone; nothing fires later against stale state.
    assert_eq!(engine.pending_timers(), 0);
    engine.tick(7000);
    assert!(engine.context().found_word.is_empty());
    assert!(!engine.context().word_fading);
}

#[test]
fn bear_match_shows_sprite_for_fixed_window() {
    let mut engine = engine_seeded(1);
    type_word(&mut engine, "bear", 0);
    assert!(engine.context().bear_visible);

    engine.tick(1999);
    assert!(engine.context().bear_visible);
    engine.tick(2000);
    assert!(!engine.context().bear_visible);
}

#[test]
fn bear_rematch_resets_window_instead_of_stacking() {
    let mut engine = engine_seeded(1);
    type_word(&mut engine, "bear", 0);
    // Typing again clears the found word and rebuilds: "bearb" dead-ends
    // to "b", then "ear" completes the word once more at t=500.
    type_word(&mut engine, "bear", 500);
    assert!(engine.context().bear_visible);

    // The original hide (t=2000) was canceled by the re-trigger.
    engine.tick(2000);
    assert!(engine.context().bear_visible);

    engine.tick(2500);
    assert!(!engine.context().bear_visible);
}

#[test]
fn duck_match_has_its_own_window() {
    let mut engine = engine_seeded(1);
    type_word(&mut engine, "duck", 0);
    assert!(engine.context().duck_visible);
    assert!(!engine.context().bear_visible);

    engine.tick(2000);
    assert!(!engine.context().duck_visible);
}

#[test]
fn fish_match_spawns_a_staggered_school() {
    let mut engine = engine_seeded(7);
    type_word(&mut engine, "fish", 0);

    let spawns = engine.context_mut().take_spawns();
    assert!(
        (6..=10).contains(&spawns.len()),
        "school size {} out of range",
        spawns.len()
    );
    for spawn in &spawns {
        assert_eq!(spawn.critter, Critter::Fish);
        assert!(spawn.delay_ms < 600, "stagger {} too long", spawn.delay_ms);
    }
    // Drained: a second read sees nothing.
    assert!(engine.context_mut().take_spawns().is_empty());
}

#[test]
fn fish_direction_split_favors_left_to_right() {
    let mut engine = engine_seeded(42);
    let mut ltr = 0usize;
    let mut total = 0usize;

    for i in 0..40 {
        type_word(&mut engine, "fish", i * 10_000);
        for spawn in engine.context_mut().take_spawns() {
            total += 1;
            if spawn.direction == Direction::Ltr {
                ltr += 1;
            }
        }
    }

    let fraction = ltr as f64 / total as f64;
    assert!(
        (0.6..0.97).contains(&fraction),
        "ltr fraction {} not near the 85% bias",
        fraction
    );
}

#[test]
fn horse_match_spawns_exactly_one() {
    let mut engine = engine_seeded(3);
    type_word(&mut engine, "horse", 0);

    let spawns = engine.context_mut().take_spawns();
    assert_eq!(spawns.len(), 1);
    assert_eq!(spawns[0].critter, Critter::Horse);
    assert_eq!(spawns[0].delay_ms, 0);
}

#[test]
fn held_space_shows_bear_until_release() {
    let mut engine = engine_seeded(1);
    engine.process_key(KeyEvent::press(Key::Space), 0);
    assert!(engine.context().bear_visible);

    // Auto-repeat while held does not re-trigger anything.
    engine.process_key(KeyEvent::press(Key::Space).with_repeat(), 50);
    assert!(engine.context().bear_visible);

    engine.release_key(Key::Space);
    assert!(!engine.context().bear_visible);
}

#[test]
fn held_backspace_shows_duck_until_release() {
    let mut engine = engine_seeded(1);
    engine.process_key(KeyEvent::press(Key::Backspace), 0);
    assert!(engine.context().duck_visible);
    engine.release_key(Key::Backspace);
    assert!(!engine.context().duck_visible);
}

#[test]
fn enter_and_tab_launch_single_fish() {
    let mut engine = engine_seeded(1);
    engine.process_key(KeyEvent::press(Key::Enter), 0);
    engine.process_key(KeyEvent::press(Key::Tab), 0);

    let spawns = engine.context_mut().take_spawns();
    assert_eq!(spawns.len(), 2);
    assert_eq!(spawns[0].direction, Direction::Ltr);
    assert_eq!(spawns[1].direction, Direction::Rtl);
    assert!(spawns.iter().all(|s| s.critter == Critter::Fish));
}

#[test]
fn history_is_most_recent_first() {
    let mut engine = engine_seeded(1);
    type_word(&mut engine, "cat", 0);
    type_word(&mut engine, "dog", 100);
    type_word(&mut engine, "cat", 200);

    assert_eq!(
        engine.context().typed_words,
        vec!["cat".to_string(), "dog".to_string(), "cat".to_string()]
    );
}
