//! Settings persistence behind an explicit key-value store.
//!
//! The toy keeps exactly two durable preferences. They live behind a small
//! externally-owned store abstraction with explicit get/set semantics (no
//! module-level singletons): the frontend decides where the values go. Two
//! stores ship here: an in-memory map for tests and embedding, and a JSON
//! file store whose values are JSON-encoded scalars, so an `include_names`
//! of `true` round-trips as a real boolean. Unreadable or missing values
//! fall back to the defaults.

use ahash::AHashMap;
use anyhow::{Context as _, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Key for the "include names in the corpus" preference.
pub const KEY_INCLUDE_NAMES: &str = "include_names";
/// Key for the "show next-letter suggestions" preference.
pub const KEY_SHOW_NEXT_LETTERS: &str = "show_next_letters";

/// An externally-owned key-value store. Values are JSON-encoded scalars.
pub trait SettingsStore {
    /// Fetch the raw JSON text for `key`, or None when unset.
    fn get(&self, key: &str) -> Option<String>;

    /// Store the raw JSON text for `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: AHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON file store: one flat object, rewritten on every set.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    map: serde_json::Map<String, Value>,
}

impl JsonFileStore {
    /// Open a store at `path`. A missing file is an empty store; a file
    /// that fails to parse is an error (it is someone else's data).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let map = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("parse settings file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => serde_json::Map::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("read settings file {}", path.display()))
            }
        };
        Ok(Self { path, map })
    }

    fn flush(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&Value::Object(self.map.clone()))?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("write settings file {}", self.path.display()))
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).map(Value::to_string)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parsed: Value =
            serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        self.map.insert(key.to_string(), parsed);
        self.flush()
    }
}

/// The two persisted preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Merge the name list into the corpus. Default false.
    pub include_names: bool,
    /// Show next-letter suggestions on screen. Default true.
    pub show_next_letters: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            include_names: false,
            show_next_letters: true,
        }
    }
}

impl Settings {
    /// Read both preferences, falling back to defaults for anything
    /// missing or malformed.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let defaults = Self::default();
        Self {
            include_names: read_bool(store, KEY_INCLUDE_NAMES, defaults.include_names),
            show_next_letters: read_bool(store, KEY_SHOW_NEXT_LETTERS, defaults.show_next_letters),
        }
    }

    /// Write both preferences.
    pub fn save(&self, store: &mut dyn SettingsStore) -> Result<()> {
        store.set(KEY_INCLUDE_NAMES, if self.include_names { "true" } else { "false" })?;
        store.set(
            KEY_SHOW_NEXT_LETTERS,
            if self.show_next_letters { "true" } else { "false" },
        )?;
        Ok(())
    }
}

fn read_bool(store: &dyn SettingsStore, key: &str, fallback: bool) -> bool {
    match store.get(key) {
        Some(raw) => serde_json::from_str::<bool>(&raw).unwrap_or(fallback),
        None => fallback,
    }
}
