//! Long-term goals broken into subtasks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Goal lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    NotStarted,
    InProgress,
    Completed,
    Paused,
}

impl Default for GoalStatus {
    fn default() -> Self {
        GoalStatus::NotStarted
    }
}

impl FromStr for GoalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "not_started" => Ok(GoalStatus::NotStarted),
            "in_progress" => Ok(GoalStatus::InProgress),
            "completed" => Ok(GoalStatus::Completed),
            "paused" => Ok(GoalStatus::Paused),
            _ => Err(ValidationError::UnknownVariant {
                kind: "goal status",
                value: s.to_string(),
            }),
        }
    }
}

/// Life area a goal belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Career,
    Health,
    Personal,
    Financial,
    Education,
    Relationships,
    Other,
}

impl Default for GoalCategory {
    fn default() -> Self {
        GoalCategory::Personal
    }
}

impl FromStr for GoalCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "career" => Ok(GoalCategory::Career),
            "health" => Ok(GoalCategory::Health),
            "personal" => Ok(GoalCategory::Personal),
            "financial" => Ok(GoalCategory::Financial),
            "education" => Ok(GoalCategory::Education),
            "relationships" => Ok(GoalCategory::Relationships),
            "other" => Ok(GoalCategory::Other),
            _ => Err(ValidationError::UnknownVariant {
                kind: "goal category",
                value: s.to_string(),
            }),
        }
    }
}

/// A step toward a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubTask {
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(default)]
    pub xp_awarded: bool,
}

impl SubTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
            xp_awarded: false,
        }
    }
}

/// A goal tracked over weeks or months.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LongTermGoal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: GoalCategory,
    #[serde(default)]
    pub status: GoalStatus,
    /// Fraction complete, always within `0.0..=1.0`.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub subtasks: Vec<SubTask>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Completion XP has been paid. Reopening the goal keeps this set.
    #[serde(default)]
    pub xp_awarded: bool,
}

impl LongTermGoal {
    /// # Errors
    /// Returns an error if `title` is blank.
    pub fn new(title: impl Into<String>, category: GoalCategory) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "title" });
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            description: None,
            category,
            status: GoalStatus::NotStarted,
            progress: 0.0,
            target_date: None,
            subtasks: Vec::new(),
            created_at: Utc::now(),
            completed_at: None,
            xp_awarded: false,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.status == GoalStatus::Completed
    }

    /// True the first time this is called on a completed goal.
    pub fn claim_completion_xp(&mut self) -> bool {
        let claim = self.is_completed() && !self.xp_awarded;
        self.xp_awarded |= claim;
        claim
    }

    /// Recompute progress from subtasks and derive the status from it.
    ///
    /// Goals without subtasks keep their manually set progress. A paused
    /// goal stays paused unless every subtask is done.
    pub fn sync_progress_from_subtasks(&mut self) {
        if self.subtasks.is_empty() {
            return;
        }
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        self.set_progress(done as f64 / self.subtasks.len() as f64);
    }

    /// Set progress, clamping into range, and derive the status.
    pub fn set_progress(&mut self, progress: f64) {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.progress = progress;

        if progress >= 1.0 {
            self.mark_status(GoalStatus::Completed);
        } else if self.status == GoalStatus::Paused {
            // keep paused
        } else if progress > 0.0 {
            self.mark_status(GoalStatus::InProgress);
        } else {
            self.mark_status(GoalStatus::NotStarted);
        }
    }

    /// Set the status, keeping `completed_at` consistent with it.
    pub fn mark_status(&mut self, status: GoalStatus) {
        match status {
            GoalStatus::Completed => {
                if self.completed_at.is_none() {
                    self.completed_at = Some(Utc::now());
                }
                self.progress = 1.0;
            }
            _ => self.completed_at = None,
        }
        self.status = status;
    }
}

/// Partial update applied by `StateManager::update_goal`.
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<GoalCategory>,
    pub target_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal_with_subtasks(n: usize) -> LongTermGoal {
        let mut goal = LongTermGoal::new("Run a marathon", GoalCategory::Health).unwrap();
        for i in 0..n {
            goal.subtasks.push(SubTask {
                id: format!("s{i}"),
                ..SubTask::new(format!("Step {i}"))
            });
        }
        goal
    }

    #[test]
    fn goal_requires_title() {
        assert!(LongTermGoal::new("", GoalCategory::Career).is_err());
    }

    #[test]
    fn progress_follows_subtasks() {
        let mut goal = goal_with_subtasks(4);
        goal.subtasks[0].completed = true;
        goal.sync_progress_from_subtasks();
        assert!((goal.progress - 0.25).abs() < f64::EPSILON);
        assert_eq!(goal.status, GoalStatus::InProgress);

        for s in &mut goal.subtasks {
            s.completed = true;
        }
        goal.sync_progress_from_subtasks();
        assert_eq!(goal.status, GoalStatus::Completed);
        assert!(goal.completed_at.is_some());
    }

    #[test]
    fn uncompleting_a_subtask_reopens_goal() {
        let mut goal = goal_with_subtasks(2);
        goal.subtasks.iter_mut().for_each(|s| s.completed = true);
        goal.sync_progress_from_subtasks();
        assert!(goal.is_completed());

        goal.subtasks[1].completed = false;
        goal.sync_progress_from_subtasks();
        assert_eq!(goal.status, GoalStatus::InProgress);
        assert!(goal.completed_at.is_none());
    }

    #[test]
    fn paused_goal_stays_paused_on_partial_progress() {
        let mut goal = goal_with_subtasks(2);
        goal.mark_status(GoalStatus::Paused);
        goal.subtasks[0].completed = true;
        goal.sync_progress_from_subtasks();
        assert_eq!(goal.status, GoalStatus::Paused);
    }

    #[test]
    fn progress_is_clamped() {
        let mut goal = goal_with_subtasks(0);
        goal.set_progress(1.7);
        assert_eq!(goal.progress, 1.0);
        assert!(goal.is_completed());
        goal.set_progress(-0.5);
        assert_eq!(goal.progress, 0.0);
        assert_eq!(goal.status, GoalStatus::NotStarted);
    }

    #[test]
    fn status_parses_with_dashes() {
        assert_eq!("in-progress".parse::<GoalStatus>().unwrap(), GoalStatus::InProgress);
        assert!("abandoned".parse::<GoalStatus>().is_err());
    }
}
