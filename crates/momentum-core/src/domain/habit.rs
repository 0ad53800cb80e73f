//! Habits and their per-day entries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Category a habit belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum HabitCategory {
    Health,
    Fitness,
    Mindfulness,
    Learning,
    Productivity,
    Social,
    Creativity,
    Finance,
    Other,
}

impl HabitCategory {
    pub const ALL: [HabitCategory; 9] = [
        HabitCategory::Health,
        HabitCategory::Fitness,
        HabitCategory::Mindfulness,
        HabitCategory::Learning,
        HabitCategory::Productivity,
        HabitCategory::Social,
        HabitCategory::Creativity,
        HabitCategory::Finance,
        HabitCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HabitCategory::Health => "health",
            HabitCategory::Fitness => "fitness",
            HabitCategory::Mindfulness => "mindfulness",
            HabitCategory::Learning => "learning",
            HabitCategory::Productivity => "productivity",
            HabitCategory::Social => "social",
            HabitCategory::Creativity => "creativity",
            HabitCategory::Finance => "finance",
            HabitCategory::Other => "other",
        }
    }
}

impl Default for HabitCategory {
    fn default() -> Self {
        HabitCategory::Other
    }
}

impl fmt::Display for HabitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HabitCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        HabitCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "habit category",
                value: s.to_string(),
            })
    }
}

/// How often a habit is expected to be done.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Daily
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            _ => Err(ValidationError::UnknownVariant {
                kind: "frequency",
                value: s.to_string(),
            }),
        }
    }
}

/// A tracked habit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: HabitCategory,
    #[serde(default)]
    pub frequency: Frequency,
    /// Times per day (or week) the habit should be done, when it is countable.
    #[serde(default)]
    pub target_count: Option<u32>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Habit {
    /// Create a new active habit.
    ///
    /// # Errors
    /// Returns an error if `name` is blank.
    pub fn new(
        name: impl Into<String>,
        category: HabitCategory,
        frequency: Frequency,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            description: None,
            category,
            frequency,
            target_count: None,
            active: true,
            created_at: Utc::now(),
        })
    }

    /// Whether the habit expects a completion on `date`.
    ///
    /// Weekly habits are due on the weekday they were created on.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;

        if !self.active || date < self.created_at.date_naive() {
            return false;
        }
        match self.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => date.weekday() == self.created_at.date_naive().weekday(),
        }
    }
}

/// Partial update applied by `StateManager::update_habit`.
#[derive(Debug, Clone, Default)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<HabitCategory>,
    pub frequency: Option<Frequency>,
    pub target_count: Option<u32>,
    pub active: Option<bool>,
}

/// One habit on one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitEntry {
    pub id: String,
    pub habit_id: String,
    pub date: NaiveDate,
    pub completed: bool,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub note: Option<String>,
    /// Completion XP has been paid for this entry.
    #[serde(default)]
    pub xp_awarded: bool,
}

impl HabitEntry {
    pub fn new(habit_id: impl Into<String>, date: NaiveDate, completed: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            habit_id: habit_id.into(),
            date,
            completed,
            count: None,
            note: None,
            xp_awarded: false,
        }
    }
}
