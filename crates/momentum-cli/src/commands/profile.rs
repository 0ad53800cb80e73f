//! Profile, level and badge commands.

use clap::Subcommand;
use momentum_core::gamification::badge_catalog;
use serde_json::json;

use super::{check_achievements, finish, open_state, print_json, CliResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Level, XP and streaks
    Show,
    /// Every badge and whether it has been earned
    Badges,
    /// Look for newly earned badges
    Check,
    /// Delete all data
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: ProfileAction) -> CliResult {
    let mut state = open_state()?;

    match action {
        ProfileAction::Show => {
            let profile = state.profile();
            let progress = state.level_table().progress(profile.total_xp);
            print_json(&json!({
                "profile": profile,
                "progress": progress,
                "max_level": state.level_table().max_level(),
            }))?;
        }
        ProfileAction::Badges => {
            let badges: Vec<_> = badge_catalog()
                .into_iter()
                .map(|badge| {
                    let earned = state
                        .profile()
                        .badges
                        .iter()
                        .find(|a| a.badge_id == badge.id)
                        .map(|a| a.earned_at);
                    json!({
                        "id": badge.id,
                        "name": badge.name,
                        "description": badge.description,
                        "icon": badge.icon,
                        "earned_at": earned,
                    })
                })
                .collect();
            print_json(&badges)?;
        }
        ProfileAction::Check => {
            let earned = check_achievements(&mut state);
            finish(&mut state)?;
            print_json(&earned)?;
        }
        ProfileAction::Reset { yes } => {
            if !yes {
                return Err("refusing to delete all data without --yes".into());
            }
            state.clear_all_data();
            finish(&mut state)?;
            eprintln!("All data cleared");
        }
    }
    Ok(())
}
