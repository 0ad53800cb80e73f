//! Social media usage commands.

use chrono::NaiveDate;
use clap::Subcommand;
use momentum_core::usage::{apps_over_limit, total_minutes};
use momentum_core::{MockUsageSource, SocialApp, SocialMediaUsage};
use serde_json::json;

use super::{finish, open_state, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum UsageAction {
    /// Add minutes for an app
    Record {
        /// instagram, tiktok, facebook, twitter, youtube, snapchat or reddit
        app: SocialApp,
        minutes: u32,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Pull a day's usage from the (simulated) system source
    Sync {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Simulate refusing the permission prompt
        #[arg(long)]
        deny: bool,
        #[arg(long, default_value = "0")]
        seed: u64,
    },
    /// Usage for a day with apps over their limit
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: UsageAction) -> CliResult {
    let mut state = open_state()?;

    match action {
        UsageAction::Record { app, minutes, date } => {
            let date = date.unwrap_or_else(today);
            let record = state.record_usage(date, app, minutes).clone();
            finish(&mut state)?;
            print_json(&record)?;
        }
        UsageAction::Sync { date, deny, seed } => {
            let date = date.unwrap_or_else(today);
            let mut source = if deny {
                MockUsageSource::denying(seed)
            } else {
                MockUsageSource::new(seed)
            };
            let usage = state.sync_usage(&mut source, date)?;
            finish(&mut state)?;
            print_json(&usage)?;
        }
        UsageAction::Show { date } => {
            let date = date.unwrap_or_else(today);
            let usage: Vec<SocialMediaUsage> =
                state.usage_for_date(date).into_iter().cloned().collect();
            let over: Vec<_> = apps_over_limit(&usage, state.config())
                .into_iter()
                .map(|(app, minutes)| json!({ "app": app, "over_by_minutes": minutes }))
                .collect();
            print_json(&json!({
                "date": date,
                "total_minutes": total_minutes(&usage),
                "usage": usage,
                "over_limit": over,
            }))?;
        }
    }
    Ok(())
}
