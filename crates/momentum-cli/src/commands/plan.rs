//! Daily plan commands.

use chrono::NaiveDate;
use clap::Subcommand;
use serde_json::json;

use super::{finish, open_state, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Add an item to a day's plan
    Add {
        title: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Link the item to a goal
        #[arg(long)]
        goal: Option<String>,
    },
    /// Show a day's plan
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Flip an item's completion
    Toggle {
        item_id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Remove an item
    Remove {
        item_id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: PlanAction) -> CliResult {
    let mut state = open_state()?;

    match action {
        PlanAction::Add { title, date, goal } => {
            let date = date.unwrap_or_else(today);
            let item = state.add_plan_item(date, &title, goal)?;
            finish(&mut state)?;
            print_json(&item)?;
        }
        PlanAction::Show { date } => {
            let date = date.unwrap_or_else(today);
            match state.plan_for(date) {
                Some(plan) => print_json(plan)?,
                None => print_json(&json!({ "date": date, "items": [] }))?,
            }
        }
        PlanAction::Toggle { item_id, date } => {
            let date = date.unwrap_or_else(today);
            let award = state.toggle_plan_item(date, &item_id, today())?;
            finish(&mut state)?;
            print_json(&json!({
                "plan": state.plan_for(date),
                "award": award,
            }))?;
        }
        PlanAction::Remove { item_id, date } => {
            let date = date.unwrap_or_else(today);
            let item = state.remove_plan_item(date, &item_id)?;
            finish(&mut state)?;
            eprintln!("Removed: {}", item.title);
        }
    }
    Ok(())
}
