//! Daily challenge commands.

use clap::Subcommand;
use momentum_core::gamification::challenge_catalog;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use super::{finish, open_state, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum ChallengeAction {
    /// Show today's challenge, picking one if needed
    Today {
        /// Seed the random pick
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Mark today's challenge done
    Complete,
    /// List every challenge
    List,
    /// Challenges completed so far
    History,
}

pub fn run(action: ChallengeAction) -> CliResult {
    let mut state = open_state()?;

    match action {
        ChallengeAction::Today { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let challenge = state.todays_challenge(today(), &mut rng).cloned();
            finish(&mut state)?;
            match challenge {
                Some(challenge) => print_json(&challenge)?,
                None => return Err("no challenges available".into()),
            }
        }
        ChallengeAction::Complete => {
            let award = state.complete_challenge(today())?;
            finish(&mut state)?;
            print_json(&json!({ "award": award }))?;
        }
        ChallengeAction::List => {
            print_json(challenge_catalog())?;
        }
        ChallengeAction::History => {
            print_json(state.completed_challenges())?;
        }
    }
    Ok(())
}
