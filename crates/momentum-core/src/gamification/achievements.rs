//! Badge catalog and milestone detection.
//!
//! Detection is pure: it reports which badges are newly earned and leaves
//! appending them and paying out XP to the caller.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::streak::{current_streak, CompletionRecord};
use crate::domain::{Achievement, Habit, HabitEntry, JournalEntry, LongTermGoal, UserProfile};
use crate::error::ValidationError;
use crate::storage::Config;

/// Every badge that can be earned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BadgeId {
    FirstStep,
    WeekWarrior,
    MonthlyMaster,
    GoalCrusher,
    ReflectiveMind,
    FirstReflection,
    HabitBuilder,
}

/// Static description of a badge.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl BadgeId {
    /// Evaluation order used by [`detect_new_achievements`].
    pub const ALL: [BadgeId; 7] = [
        BadgeId::FirstStep,
        BadgeId::WeekWarrior,
        BadgeId::MonthlyMaster,
        BadgeId::GoalCrusher,
        BadgeId::ReflectiveMind,
        BadgeId::FirstReflection,
        BadgeId::HabitBuilder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeId::FirstStep => "first_step",
            BadgeId::WeekWarrior => "week_warrior",
            BadgeId::MonthlyMaster => "monthly_master",
            BadgeId::GoalCrusher => "goal_crusher",
            BadgeId::ReflectiveMind => "reflective_mind",
            BadgeId::FirstReflection => "first_reflection",
            BadgeId::HabitBuilder => "habit_builder",
        }
    }

    pub fn badge(&self) -> Badge {
        let (name, description, icon) = match self {
            BadgeId::FirstStep => ("First Step", "Complete your first habit", "footsteps"),
            BadgeId::WeekWarrior => ("Week Warrior", "Keep a habit streak for 7 days", "flame"),
            BadgeId::MonthlyMaster => (
                "Monthly Master",
                "Keep a habit streak for 30 days",
                "trophy",
            ),
            BadgeId::GoalCrusher => ("Goal Crusher", "Complete a long-term goal", "flag"),
            BadgeId::ReflectiveMind => ("Reflective Mind", "Journal 7 days in a row", "book"),
            BadgeId::FirstReflection => ("First Reflection", "Write your first journal entry", "pencil"),
            BadgeId::HabitBuilder => ("Habit Builder", "Track 5 active habits", "layers"),
        };
        Badge {
            id: *self,
            name,
            description,
            icon,
        }
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BadgeId::ALL
            .iter()
            .copied()
            .find(|b| b.as_str() == s.trim())
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "badge",
                value: s.to_string(),
            })
    }
}

/// The full catalog, in evaluation order.
pub fn badge_catalog() -> Vec<Badge> {
    BadgeId::ALL.iter().map(BadgeId::badge).collect()
}

/// Thresholds and payout for detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementRules {
    pub xp_reward: u64,
    pub week_streak_days: u32,
    pub month_streak_days: u32,
    pub journal_streak_days: u32,
    pub habit_builder_count: usize,
}

impl Default for AchievementRules {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for AchievementRules {
    fn from(config: &Config) -> Self {
        Self {
            xp_reward: config.gamification.achievement_xp,
            week_streak_days: config.streaks.week_badge_days,
            month_streak_days: config.streaks.month_badge_days,
            journal_streak_days: config.streaks.journal_badge_days,
            habit_builder_count: config.streaks.habit_builder_count,
        }
    }
}

/// Borrowed view of everything the predicates look at.
#[derive(Debug, Clone, Copy)]
pub struct AchievementContext<'a> {
    pub profile: &'a UserProfile,
    pub habits: &'a [Habit],
    pub entries: &'a [HabitEntry],
    pub goals: &'a [LongTermGoal],
    pub journal: &'a [JournalEntry],
    pub today: NaiveDate,
}

impl AchievementContext<'_> {
    /// Best current streak across all habits.
    pub fn max_habit_streak(&self) -> u32 {
        self.habits
            .iter()
            .map(|habit| {
                let records = self
                    .entries
                    .iter()
                    .filter(|e| e.habit_id == habit.id)
                    .map(|e| CompletionRecord::new(e.date, e.completed));
                current_streak(records, self.today)
            })
            .max()
            .unwrap_or(0)
    }

    pub fn journal_streak(&self) -> u32 {
        current_streak(
            self.journal.iter().map(|j| CompletionRecord::new(j.date, true)),
            self.today,
        )
    }

    fn qualifies(&self, badge: BadgeId, rules: &AchievementRules, habit_streak: u32) -> bool {
        match badge {
            BadgeId::FirstStep => self.entries.iter().any(|e| e.completed),
            BadgeId::WeekWarrior => habit_streak >= rules.week_streak_days,
            BadgeId::MonthlyMaster => habit_streak >= rules.month_streak_days,
            BadgeId::GoalCrusher => self.goals.iter().any(LongTermGoal::is_completed),
            BadgeId::ReflectiveMind => self.journal_streak() >= rules.journal_streak_days,
            BadgeId::FirstReflection => !self.journal.is_empty(),
            BadgeId::HabitBuilder => {
                self.habits.iter().filter(|h| h.active).count() >= rules.habit_builder_count
            }
        }
    }
}

/// Badges that qualify now and are not yet held, in catalog order.
pub fn detect_new_achievements(
    ctx: &AchievementContext<'_>,
    rules: &AchievementRules,
) -> Vec<Achievement> {
    let habit_streak = ctx.max_habit_streak();
    let now = Utc::now();

    BadgeId::ALL
        .iter()
        .copied()
        .filter(|badge| !ctx.profile.has_badge(*badge))
        .filter(|badge| ctx.qualifies(*badge, rules, habit_streak))
        .map(|badge| Achievement {
            id: uuid::Uuid::new_v4().to_string(),
            badge_id: badge,
            name: badge.badge().name.to_string(),
            xp_reward: rules.xp_reward,
            earned_at: now,
        })
        .collect()
}
