//! Flat key-value persistence.
//!
//! Every domain collection is stored as one JSON blob under a fixed key
//! (see [`keys`]). The state manager only ever talks to the
//! [`KeyValueStore`] trait, so the SQLite-backed store and the in-memory
//! store are interchangeable.

mod config;
pub mod sqlite;

pub use config::{ChallengeConfig, Config, GamificationConfig, StreakConfig, UsageConfig, XpConfig};
pub use sqlite::SqliteStore;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{ConfigError, StorageError};

/// Fixed collection keys.
pub mod keys {
    pub const GOALS: &str = "goals";
    pub const HABITS: &str = "habits";
    pub const HABIT_ENTRIES: &str = "habitEntries";
    pub const DAILY_PLANS: &str = "dailyPlans";
    pub const JOURNAL_ENTRIES: &str = "journalEntries";
    pub const USER_PROFILE: &str = "userProfile";
    pub const SOCIAL_MEDIA_USAGE: &str = "socialMediaUsage";
    pub const DAILY_CHALLENGE: &str = "dailyChallenge";
    pub const COMPLETED_CHALLENGES: &str = "completedChallenges";

    pub const ALL: [&str; 9] = [
        GOALS,
        HABITS,
        HABIT_ENTRIES,
        DAILY_PLANS,
        JOURNAL_ENTRIES,
        USER_PROFILE,
        SOCIAL_MEDIA_USAGE,
        DAILY_CHALLENGE,
        COMPLETED_CHALLENGES,
    ];
}

/// Get/set/remove over opaque string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// HashMap-backed store. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Returns the data directory, creating it if needed.
///
/// `MOMENTUM_DATA_DIR` wins outright. Otherwise `~/.config/momentum[-dev]/`,
/// with `MOMENTUM_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("MOMENTUM_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("MOMENTUM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("momentum-dev")
            } else {
                base_dir.join("momentum")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set_remove() {
        let mut store = MemoryStore::new();
        assert!(store.get(keys::HABITS).unwrap().is_none());

        store.set(keys::HABITS, "[]").unwrap();
        assert_eq!(store.get(keys::HABITS).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);

        store.remove(keys::HABITS).unwrap();
        assert!(store.get(keys::HABITS).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn removing_missing_key_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.remove("nothing-here").is_ok());
    }

    #[test]
    fn collection_keys_are_unique() {
        let mut all = keys::ALL.to_vec();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), keys::ALL.len());
    }
}
