//! Domain records persisted by the state manager.

pub mod goal;
pub mod habit;
pub mod journal;
pub mod plan;
pub mod profile;
pub mod usage;

pub use goal::{GoalCategory, GoalStatus, GoalUpdate, LongTermGoal, SubTask};
pub use habit::{Frequency, Habit, HabitCategory, HabitEntry, HabitUpdate};
pub use journal::{JournalEntry, JournalType};
pub use plan::{DailyPlan, PlanItem};
pub use profile::{Achievement, Streaks, UserProfile};
pub use usage::{SocialApp, SocialMediaUsage};
