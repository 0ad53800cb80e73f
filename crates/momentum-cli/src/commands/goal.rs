//! Long-term goal commands.

use chrono::NaiveDate;
use clap::Subcommand;
use momentum_core::domain::GoalUpdate;
use momentum_core::{GoalCategory, GoalStatus, LongTermGoal};
use serde_json::json;

use super::{check_achievements, finish, open_state, print_json, today, CliResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a goal
    Add {
        title: String,
        /// career, health, personal, financial, education, relationships or other
        #[arg(long, default_value = "personal")]
        category: GoalCategory,
        #[arg(long)]
        description: Option<String>,
        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        target_date: Option<NaiveDate>,
    },
    /// List goals
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<GoalStatus>,
    },
    /// Show one goal
    Show { id: String },
    /// Update a goal's details
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<GoalCategory>,
        #[arg(long)]
        target_date: Option<NaiveDate>,
    },
    /// Delete a goal
    Delete { id: String },
    /// Add a subtask to a goal
    AddSubtask { goal_id: String, title: String },
    /// Flip a subtask's completion
    ToggleSubtask { goal_id: String, subtask_id: String },
    /// Set a goal's status
    Status {
        id: String,
        /// not_started, in_progress, completed or paused
        status: GoalStatus,
    },
    /// Set progress (0.0 - 1.0) on a goal without subtasks
    Progress { id: String, progress: f64 },
}

pub fn run(action: GoalAction) -> CliResult {
    let mut state = open_state()?;

    match action {
        GoalAction::Add {
            title,
            category,
            description,
            target_date,
        } => {
            let mut goal = LongTermGoal::new(title, category)?;
            goal.description = description;
            goal.target_date = target_date;
            let goal = state.add_goal(goal)?.clone();
            finish(&mut state)?;
            eprintln!("Goal created: {}", goal.id);
            print_json(&goal)?;
        }
        GoalAction::List { status } => {
            let goals: Vec<&LongTermGoal> = state
                .goals()
                .iter()
                .filter(|g| status.map_or(true, |s| g.status == s))
                .collect();
            print_json(&goals)?;
        }
        GoalAction::Show { id } => {
            let goal = state
                .goal(&id)
                .ok_or_else(|| format!("goal not found: {id}"))?;
            print_json(goal)?;
        }
        GoalAction::Update {
            id,
            title,
            description,
            category,
            target_date,
        } => {
            let update = GoalUpdate {
                title,
                description,
                category,
                target_date,
            };
            let goal = state.update_goal(&id, update)?.clone();
            finish(&mut state)?;
            print_json(&goal)?;
        }
        GoalAction::Delete { id } => {
            let goal = state.delete_goal(&id)?;
            finish(&mut state)?;
            eprintln!("Goal deleted: {}", goal.title);
        }
        GoalAction::AddSubtask { goal_id, title } => {
            let subtask = state.add_subtask(&goal_id, &title)?;
            finish(&mut state)?;
            print_json(&subtask)?;
        }
        GoalAction::ToggleSubtask {
            goal_id,
            subtask_id,
        } => {
            let award = state.toggle_subtask(&goal_id, &subtask_id, today())?;
            report(&mut state, &goal_id, award)?;
        }
        GoalAction::Status { id, status } => {
            let award = state.set_goal_status(&id, status, today())?;
            report(&mut state, &id, award)?;
        }
        GoalAction::Progress { id, progress } => {
            let award = state.set_goal_progress(&id, progress, today())?;
            report(&mut state, &id, award)?;
        }
    }
    Ok(())
}

fn report(
    state: &mut momentum_core::StateManager,
    goal_id: &str,
    award: momentum_core::Award,
) -> CliResult {
    let achievements = check_achievements(state);
    finish(state)?;
    print_json(&json!({
        "goal": state.goal(goal_id),
        "award": award,
        "achievements": achievements,
    }))
}
