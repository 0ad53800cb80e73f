//! # Momentum Core Library
//!
//! Domain logic for a personal habit, goal and journal tracker with a small
//! gamification layer. Every operation is exposed through the `momentum`
//! CLI binary; this crate holds the rules and the persistence.
//!
//! ## Architecture
//!
//! - **Domain**: habits, goals, daily plans, journal entries, the user
//!   profile and social media usage records
//! - **Gamification**: pure level, streak, achievement and daily challenge
//!   calculations
//! - **State**: [`StateManager`] owns every collection and writes it back to a
//!   [`KeyValueStore`] after each mutation
//! - **Storage**: SQLite-backed key-value store and TOML configuration
//!
//! ## Key Components
//!
//! - [`StateManager`]: the single owner of domain state
//! - [`SqliteStore`]: on-disk key-value persistence
//! - [`Config`]: XP rewards, level thresholds and limits
//! - [`LevelTable`]: XP-to-level mapping

pub mod domain;
pub mod error;
pub mod gamification;
pub mod state;
pub mod stats;
pub mod storage;
pub mod usage;

pub use domain::{
    Achievement, DailyPlan, Frequency, GoalCategory, GoalStatus, Habit, HabitCategory, HabitEntry,
    JournalEntry, JournalType, LongTermGoal, PlanItem, SocialApp, SocialMediaUsage, SubTask,
    UserProfile,
};
pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use gamification::{BadgeId, DailyChallenge, LevelTable};
pub use state::{Award, StateManager};
pub use storage::{data_dir, Config, KeyValueStore, MemoryStore, SqliteStore};
pub use usage::{MockUsageSource, UsageSource};
