//! Subcommand implementations.
//!
//! Every group opens the state itself, runs one action and prints the result
//! as pretty JSON on stdout.

pub mod challenge;
pub mod config;
pub mod goal;
pub mod habit;
pub mod journal;
pub mod plan;
pub mod profile;
pub mod stats;
pub mod usage;

use chrono::{Local, NaiveDate};
use momentum_core::{Achievement, Config, SqliteStore, StateManager};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Load the configuration and the on-disk store.
pub fn open_state() -> Result<StateManager, Box<dyn std::error::Error>> {
    if let Ok(dir) = momentum_core::data_dir() {
        tracing::debug!(dir = %dir.display(), "using data directory");
    }
    let config = Config::load()?;
    let store = SqliteStore::open()?;
    Ok(StateManager::load(Box::new(store), config)?)
}

/// Fail the command if any write after a mutation was lost.
pub fn finish(state: &mut StateManager) -> CliResult {
    match state.take_persist_error() {
        Some(e) => Err(format!("changes were not saved: {e}").into()),
        None => Ok(()),
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run badge detection and report anything new on stderr.
pub fn check_achievements(state: &mut StateManager) -> Vec<Achievement> {
    let earned = state.check_achievements(today());
    for achievement in &earned {
        eprintln!(
            "Achievement unlocked: {} (+{} XP)",
            achievement.name, achievement.xp_reward
        );
    }
    earned
}
