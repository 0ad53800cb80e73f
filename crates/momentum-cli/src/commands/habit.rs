//! Habit tracking commands.

use chrono::NaiveDate;
use clap::Subcommand;
use momentum_core::domain::HabitUpdate;
use momentum_core::{Frequency, Habit, HabitCategory};
use serde_json::json;

use super::{check_achievements, finish, open_state, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a habit
    Add {
        /// Habit name
        name: String,
        /// health, fitness, mindfulness, learning, productivity, social,
        /// creativity, finance or other
        #[arg(long, default_value = "other")]
        category: HabitCategory,
        /// daily or weekly
        #[arg(long, default_value = "daily")]
        frequency: Frequency,
        #[arg(long)]
        description: Option<String>,
        /// Target count per occurrence
        #[arg(long)]
        target: Option<u32>,
    },
    /// List habits
    List {
        /// Include archived habits
        #[arg(long)]
        all: bool,
    },
    /// Update a habit
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<HabitCategory>,
        #[arg(long)]
        frequency: Option<Frequency>,
        #[arg(long)]
        target: Option<u32>,
        /// Archive (false) or restore (true)
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a habit and its history
    Delete { id: String },
    /// Record a habit for a day
    Log {
        id: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Record as not done
        #[arg(long)]
        undone: bool,
        #[arg(long)]
        count: Option<u32>,
    },
    /// Flip completion for a day
    Toggle {
        id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Entries recorded on a day
    Entries {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Current streak for a habit
    Streak { id: String },
}

pub fn run(action: HabitAction) -> CliResult {
    let mut state = open_state()?;

    match action {
        HabitAction::Add {
            name,
            category,
            frequency,
            description,
            target,
        } => {
            let mut habit = Habit::new(name, category, frequency)?;
            habit.description = description;
            habit.target_count = target;
            let habit = state.add_habit(habit)?.clone();
            finish(&mut state)?;
            eprintln!("Habit created: {}", habit.id);
            print_json(&habit)?;
        }
        HabitAction::List { all } => {
            let habits: Vec<&Habit> = if all {
                state.habits().iter().collect()
            } else {
                state.active_habits().collect()
            };
            print_json(&habits)?;
        }
        HabitAction::Update {
            id,
            name,
            description,
            category,
            frequency,
            target,
            active,
        } => {
            let update = HabitUpdate {
                name,
                description,
                category,
                frequency,
                target_count: target,
                active,
            };
            let habit = state.update_habit(&id, update)?.clone();
            finish(&mut state)?;
            print_json(&habit)?;
        }
        HabitAction::Delete { id } => {
            let habit = state.delete_habit(&id)?;
            finish(&mut state)?;
            eprintln!("Habit deleted: {}", habit.name);
        }
        HabitAction::Log {
            id,
            date,
            undone,
            count,
        } => {
            let date = date.unwrap_or_else(today);
            let (entry, award) = state.log_habit(&id, date, !undone, count)?;
            let achievements = check_achievements(&mut state);
            finish(&mut state)?;
            print_json(&json!({
                "entry": entry,
                "award": award,
                "achievements": achievements,
            }))?;
        }
        HabitAction::Toggle { id, date } => {
            let date = date.unwrap_or_else(today);
            let (entry, award) = state.toggle_habit(&id, date)?;
            let achievements = check_achievements(&mut state);
            finish(&mut state)?;
            print_json(&json!({
                "entry": entry,
                "award": award,
                "achievements": achievements,
            }))?;
        }
        HabitAction::Entries { date } => {
            let date = date.unwrap_or_else(today);
            print_json(&state.entries_for_date(date))?;
        }
        HabitAction::Streak { id } => {
            let habit = state
                .habit(&id)
                .ok_or_else(|| format!("habit not found: {id}"))?;
            print_json(&json!({
                "habit_id": habit.id,
                "name": habit.name,
                "streak": state.habit_streak(&id, today()),
            }))?;
        }
    }
    Ok(())
}
