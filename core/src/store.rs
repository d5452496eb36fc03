use alloc::string::{String, ToString};
use hashbrown::HashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player preferences that outlive a single game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub difficulty: Difficulty,
    /// Cell edge length in pixels.
    pub cell_size: u16,
}

impl Preferences {
    pub const DEFAULT_CELL_SIZE: u16 = 40;
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            cell_size: Self::DEFAULT_CELL_SIZE,
        }
    }
}

/// Where preferences are loaded from at startup and saved to on change.
pub trait SettingsStore {
    /// `None` when nothing has been saved yet.
    fn load(&self) -> Option<Preferences>;
    fn save(&mut self, preferences: &Preferences) -> Result<()>;
}

/// Flat string storage, e.g. the browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

pub const DIFFICULTY_KEY: &str = "sapper:difficulty";
pub const CELL_SIZE_KEY: &str = "sapper:cell-size";

fn read_value<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Ignoring unreadable {} value {:?}: {}", key, raw, err);
            None
        }
    }
}

fn write_value<S, T>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(value).map_err(|err| GameError::Storage(err.to_string()))?;
    store.set(key, raw)
}

impl<S: KeyValueStore> SettingsStore for S {
    fn load(&self) -> Option<Preferences> {
        let difficulty: Option<Difficulty> = read_value(self, DIFFICULTY_KEY);
        let cell_size: Option<u16> = read_value(self, CELL_SIZE_KEY);
        if difficulty.is_none() && cell_size.is_none() {
            return None;
        }

        let defaults = Preferences::default();
        Some(Preferences {
            difficulty: difficulty.unwrap_or(defaults.difficulty),
            cell_size: cell_size.unwrap_or(defaults.cell_size),
        })
    }

    fn save(&mut self, preferences: &Preferences) -> Result<()> {
        write_value(self, DIFFICULTY_KEY, &preferences.difficulty)?;
        write_value(self, CELL_SIZE_KEY, &preferences.cell_size)
    }
}

/// In-memory key/value storage for tests and hosts without persistent storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
