use chrono::{Duration, NaiveDate};
use clap::Subcommand;
use momentum_core::stats::{day_summary, habit_completion_rate, weekly_summary};
use serde_json::json;

use super::{open_state, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Summary for one day
    Day {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Summaries for the last seven days
    Week,
    /// Completion rate for a habit
    Habit {
        id: String,
        /// Number of days to look back
        #[arg(long, default_value = "30")]
        days: u32,
    },
}

pub fn run(action: StatsAction) -> CliResult {
    let state = open_state()?;

    match action {
        StatsAction::Day { date } => {
            let date = date.unwrap_or_else(today);
            print_json(&day_summary(&state, date))?;
        }
        StatsAction::Week => {
            print_json(&weekly_summary(&state, today()))?;
        }
        StatsAction::Habit { id, days } => {
            let to = today();
            let from = to
                .checked_sub_signed(Duration::days(i64::from(days.saturating_sub(1))))
                .ok_or_else(|| format!("--days {days} reaches past the earliest supported date"))?;
            let rate = habit_completion_rate(&state, &id, from, to)?;
            print_json(&json!({
                "habit_id": id,
                "from": from,
                "to": to,
                "completion_rate": rate,
                "current_streak": state.habit_streak(&id, to),
                "longest_streak": state.habit_longest_streak(&id),
            }))?;
        }
    }
    Ok(())
}
