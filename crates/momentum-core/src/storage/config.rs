//! TOML-based application configuration.
//!
//! Stores tunables for:
//! - Level thresholds and the achievement reward
//! - Per-action XP rewards
//! - Daily challenge rotation
//! - Social media daily limits
//! - Streak badge thresholds
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::domain::SocialApp;
use crate::error::{ConfigError, ValidationError};
use crate::gamification::LevelTable;

/// Level curve and achievement payout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationConfig {
    #[serde(default = "default_level_thresholds")]
    pub level_thresholds: Vec<u64>,
    #[serde(default = "default_achievement_xp")]
    pub achievement_xp: u64,
}

/// XP granted per completed action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpConfig {
    #[serde(default = "default_habit_xp")]
    pub habit_completion: u64,
    #[serde(default = "default_subtask_xp")]
    pub subtask_completion: u64,
    #[serde(default = "default_goal_xp")]
    pub goal_completion: u64,
    #[serde(default = "default_journal_xp")]
    pub journal_entry: u64,
    #[serde(default = "default_plan_item_xp")]
    pub plan_item: u64,
}

/// Daily challenge rotation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeConfig {
    /// Only count challenges completed today when excluding templates.
    /// Off by default: a completed challenge stays excluded until every
    /// template has been completed once.
    #[serde(default)]
    pub reset_daily: bool,
}

/// Social media limits, in minutes per day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageConfig {
    #[serde(default = "default_daily_limits")]
    pub daily_limit_minutes: BTreeMap<SocialApp, u32>,
}

/// Day counts that unlock streak badges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakConfig {
    #[serde(default = "default_week_days")]
    pub week_badge_days: u32,
    #[serde(default = "default_month_days")]
    pub month_badge_days: u32,
    #[serde(default = "default_week_days")]
    pub journal_badge_days: u32,
    #[serde(default = "default_habit_builder_count")]
    pub habit_builder_count: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gamification: GamificationConfig,
    #[serde(default)]
    pub xp: XpConfig,
    #[serde(default)]
    pub challenges: ChallengeConfig,
    #[serde(default)]
    pub usage: UsageConfig,
    #[serde(default)]
    pub streaks: StreakConfig,
}

fn default_level_thresholds() -> Vec<u64> {
    vec![0, 100, 250, 500, 1000, 2000, 3500, 5500, 8000, 11000]
}
fn default_achievement_xp() -> u64 {
    50
}
fn default_habit_xp() -> u64 {
    10
}
fn default_subtask_xp() -> u64 {
    15
}
fn default_goal_xp() -> u64 {
    100
}
fn default_journal_xp() -> u64 {
    20
}
fn default_plan_item_xp() -> u64 {
    5
}
fn default_daily_limits() -> BTreeMap<SocialApp, u32> {
    SocialApp::ALL.iter().map(|app| (*app, 60)).collect()
}
fn default_week_days() -> u32 {
    7
}
fn default_month_days() -> u32 {
    30
}
fn default_habit_builder_count() -> usize {
    5
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            level_thresholds: default_level_thresholds(),
            achievement_xp: default_achievement_xp(),
        }
    }
}

impl Default for XpConfig {
    fn default() -> Self {
        Self {
            habit_completion: default_habit_xp(),
            subtask_completion: default_subtask_xp(),
            goal_completion: default_goal_xp(),
            journal_entry: default_journal_xp(),
            plan_item: default_plan_item_xp(),
        }
    }
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            daily_limit_minutes: default_daily_limits(),
        }
    }
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            week_badge_days: default_week_days(),
            month_badge_days: default_month_days(),
            journal_badge_days: default_week_days(),
            habit_builder_count: default_habit_builder_count(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("falling back to default config: {e}");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. On error `self` is unchanged.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }

    /// The level curve described by `gamification.level_thresholds`.
    pub fn level_table(&self) -> Result<LevelTable, ValidationError> {
        LevelTable::new(self.gamification.level_thresholds.clone())
    }

    /// Daily limit for an app, if one is configured.
    pub fn daily_limit(&self, app: SocialApp) -> Option<u32> {
        self.usage.daily_limit_minutes.get(&app).copied()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.level_table().map_err(|e| ConfigError::InvalidValue {
            key: "gamification.level_thresholds".to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.gamification.achievement_xp, 50);
        assert_eq!(parsed.daily_limit(SocialApp::Instagram), Some(60));
        assert!(!parsed.challenges.reset_daily);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: Config = toml::from_str("[xp]\nhabit_completion = 25\n").unwrap();
        assert_eq!(parsed.xp.habit_completion, 25);
        assert_eq!(parsed.xp.goal_completion, 100);
        assert_eq!(parsed.gamification.level_thresholds[0], 0);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("challenges.reset_daily").as_deref(), Some("false"));
        assert_eq!(cfg.get("xp.journal_entry").as_deref(), Some("20"));
        assert_eq!(
            cfg.get("usage.daily_limit_minutes.tiktok").as_deref(),
            Some("60")
        );
        assert!(cfg.get("xp.missing_key").is_none());
    }

    #[test]
    fn set_value_updates_nested_bool() {
        let mut cfg = Config::default();
        cfg.set_value("challenges.reset_daily", "true").unwrap();
        assert!(cfg.challenges.reset_daily);
    }

    #[test]
    fn set_value_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.set_value("gamification.achievement_xp", "75").unwrap();
        assert_eq!(cfg.gamification.achievement_xp, 75);
    }

    #[test]
    fn set_value_replaces_threshold_array() {
        let mut cfg = Config::default();
        cfg.set_value("gamification.level_thresholds", "[0, 100, 250]")
            .unwrap();
        assert_eq!(cfg.gamification.level_thresholds, vec![0, 100, 250]);
    }

    #[test]
    fn set_value_rejects_descending_thresholds() {
        let mut cfg = Config::default();
        let result = cfg.set_value("gamification.level_thresholds", "[0, 300, 200]");
        assert!(result.is_err());
        assert_eq!(cfg.gamification.level_thresholds[1], 100);
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let mut cfg = Config::default();
        let result = cfg.set_value("xp.nonexistent_key", "1");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_value_rejects_invalid_type() {
        let mut cfg = Config::default();
        let result = cfg.set_value("challenges.reset_daily", "not_a_bool");
        assert!(result.is_err());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.xp.plan_item, 5);
        assert!(path.exists());
    }

    #[test]
    fn load_from_rejects_bad_thresholds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gamification]\nlevel_thresholds = [10, 20]\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
