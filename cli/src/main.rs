use anyhow::Result;
use clap::Parser;
use keysmash_core::{
    Config, Corpus, JsonFileStore, Key, KeyEvent, PlayEngine, Settings, Spawn,
};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Instant;

/// Interactive terminal front-end for the keysmash engine.
///
/// Type letters and press Enter to feed them through the desktop state
/// machine; switch to tap mode to drive the mobile builder instead.
#[derive(Debug, Parser)]
#[command(name = "keysmash", version)]
struct Args {
    /// Load engine timings from a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Persist the two preferences to this JSON file.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Include the name list in the corpus for this run.
    #[arg(long)]
    include_names: bool,

    /// Hide next-letter suggestions for this run.
    #[arg(long)]
    no_suggestions: bool,

    /// Seed the RNG for reproducible fish schools and tap offers.
    #[arg(long)]
    seed: Option<u64>,

    /// Start in mobile tap mode.
    #[arg(long)]
    tap: bool,
}

fn describe_spawn(spawn: &Spawn) -> String {
    let critter = match spawn.critter {
        keysmash_core::Critter::Fish => "fish",
        keysmash_core::Critter::Horse => "horse",
    };
    let dir = match spawn.direction {
        keysmash_core::Direction::Ltr => "->",
        keysmash_core::Direction::Rtl => "<-",
    };
    format!("{} {} (+{}ms)", critter, dir, spawn.delay_ms)
}

fn print_state(engine: &mut PlayEngine, tap_mode: bool) {
    let spawns = engine.context_mut().take_spawns();
    let ctx = engine.context();

    if tap_mode {
        if !ctx.tap_sequence.is_empty() {
            println!("  sequence: {}", ctx.tap_sequence);
        }
        if !ctx.offered_letters.is_empty() {
            let offered: Vec<String> =
                ctx.offered_letters.iter().map(|c| c.to_string()).collect();
            println!("  tap one of: [{}]", offered.join(" "));
        }
    } else {
        if !ctx.display.is_empty() {
            println!("  display: {}", ctx.display);
        }
        if !ctx.next_letters.is_empty() {
            let next: Vec<String> = ctx.next_letters.iter().map(|c| c.to_string()).collect();
            println!("  next: [{}]", next.join(" "));
        }
    }

    if ctx.has_found_word() {
        let fading = if ctx.word_fading { " (fading)" } else { "" };
        println!("  ★ found: {}{}", ctx.found_word, fading);
    }
    if ctx.bear_visible {
        println!("  🐻 bear on screen");
    }
    if ctx.duck_visible {
        println!("  🦆 duck on screen");
    }
    for spawn in &spawns {
        println!("  ~ spawn {}", describe_spawn(spawn));
    }
}

fn feed_line(engine: &mut PlayEngine, line: &str, now_ms: u64) {
    for ch in line.chars() {
        let event = match ch {
            c if c.is_ascii_alphabetic() => KeyEvent::letter(c.to_ascii_lowercase()),
            ' ' => KeyEvent::press(Key::Space),
            c => KeyEvent::press(Key::Char(c)),
        };
        engine.process_key(event, now_ms);
        if ch == ' ' {
            // A line is not a held key; release right away.
            engine.release_key(Key::Space);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let cfg = Config::load_toml(path)?;
            println!("✓ Loaded config from {}", path.display());
            cfg
        }
        None => Config::default(),
    };

    let mut store: Option<JsonFileStore> = match &args.settings {
        Some(path) => Some(JsonFileStore::open(path)?),
        None => None,
    };
    let mut settings = match &store {
        Some(s) => Settings::load(s),
        None => Settings::default(),
    };
    if args.include_names {
        settings.include_names = true;
    }
    if args.no_suggestions {
        settings.show_next_letters = false;
    }

    let corpus = Corpus::with_defaults();
    let mut engine = match args.seed {
        Some(seed) => PlayEngine::with_seed(corpus, config, seed),
        None => PlayEngine::new(corpus, config),
    };
    engine.apply_settings(settings);
    tracing::debug!(seed = ?args.seed, corpus_len = engine.corpus().len(), "engine ready");

    let mut tap_mode = args.tap;
    let start = Instant::now();

    println!("═══════════════════════════════════════════════════");
    println!("  keysmash - keyboard toy engine, terminal edition");
    println!("═══════════════════════════════════════════════════");
    println!();
    println!(
        "Corpus: {} entries (names {})",
        engine.corpus().len(),
        if engine.settings().include_names { "on" } else { "off" }
    );
    println!("Type letters and press Enter. Commands:");
    println!("  :names on|off     include the name list");
    println!("  :suggest on|off   show next-letter suggestions");
    println!("  :tap / :type      switch between tap and keyboard mode");
    println!("  :quit             exit");
    println!();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let now_ms = start.elapsed().as_millis() as u64;
        engine.tick(now_ms);

        let trimmed = line.trim();
        match trimmed {
            ":quit" | ":q" => break,
            ":tap" => {
                tap_mode = true;
                println!("✓ tap mode");
                continue;
            }
            ":type" => {
                tap_mode = false;
                println!("✓ keyboard mode");
                continue;
            }
            ":names on" | ":names off" => {
                let on = trimmed.ends_with("on");
                engine.set_include_names(on);
                persist(&mut store, engine.settings());
                println!("✓ names {}", if on { "on" } else { "off" });
                continue;
            }
            ":suggest on" | ":suggest off" => {
                let on = trimmed.ends_with("on");
                engine.set_show_next_letters(on);
                persist(&mut store, engine.settings());
                println!("✓ suggestions {}", if on { "on" } else { "off" });
                continue;
            }
            _ => {}
        }

        if tap_mode {
            if trimmed.is_empty() {
                engine.blank_tap(now_ms);
            } else if let Some(ch) = trimmed.chars().next().filter(char::is_ascii_alphabetic) {
                engine.letter_tap(ch.to_ascii_lowercase(), now_ms);
            }
        } else {
            feed_line(&mut engine, &line, now_ms);
        }

        engine.tick(now_ms);
        print_state(&mut engine, tap_mode);
    }

    Ok(())
}

fn persist(store: &mut Option<JsonFileStore>, settings: Settings) {
    if let Some(store) = store {
        if let Err(e) = settings.save(store) {
            eprintln!("⚠ failed to persist settings: {}", e);
        }
    }
}
