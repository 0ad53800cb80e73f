//! Journal commands.

use chrono::{Duration, NaiveDate};
use clap::Subcommand;
use momentum_core::{JournalEntry, JournalType};
use serde_json::json;

use super::{check_achievements, finish, open_state, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum JournalAction {
    /// Write an entry; replaces an entry of the same type on the same day
    Add {
        /// morning, evening or free
        #[arg(long = "type", default_value = "free")]
        entry_type: JournalType,
        /// Mood score (1-5)
        #[arg(long)]
        mood: u8,
        /// Energy score (1-5)
        #[arg(long)]
        energy: u8,
        /// Stress score (1-5)
        #[arg(long)]
        stress: u8,
        #[arg(long, default_value = "")]
        content: String,
        /// Something you are grateful for; repeatable
        #[arg(long)]
        gratitude: Vec<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List entries in a date range
    List {
        /// Start date, defaults to 7 days ago
        #[arg(long)]
        from: Option<NaiveDate>,
        /// End date, defaults to today
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Delete an entry
    Delete { id: String },
    /// Consecutive days with at least one entry
    Streak,
}

pub fn run(action: JournalAction) -> CliResult {
    let mut state = open_state()?;

    match action {
        JournalAction::Add {
            entry_type,
            mood,
            energy,
            stress,
            content,
            gratitude,
            date,
        } => {
            let date = date.unwrap_or_else(today);
            let mut entry = JournalEntry::new(date, entry_type, mood, energy, stress, content)?;
            entry.gratitude = gratitude;
            let id = entry.id.clone();
            let award = state.add_journal_entry(entry)?;
            let achievements = check_achievements(&mut state);
            finish(&mut state)?;
            print_json(&json!({
                "entry": state.journal_entries().iter().find(|j| j.id == id),
                "award": award,
                "achievements": achievements,
            }))?;
        }
        JournalAction::List { from, to } => {
            let to = to.unwrap_or_else(today);
            let from = match from {
                Some(from) => from,
                None => to
                    .checked_sub_signed(Duration::days(7))
                    .ok_or_else(|| format!("no week before {to} to list"))?,
            };
            print_json(&state.journal_entries_between(from, to))?;
        }
        JournalAction::Delete { id } => {
            let entry = state.delete_journal_entry(&id)?;
            finish(&mut state)?;
            eprintln!("Journal entry deleted: {} ({})", entry.date, entry.entry_type);
        }
        JournalAction::Streak => {
            print_json(&json!({ "streak": state.journal_streak(today()) }))?;
        }
    }
    Ok(())
}
