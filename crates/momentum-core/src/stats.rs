//! Read-only summaries over the current state.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::JournalEntry;
use crate::error::{CoreError, Result};
use crate::state::StateManager;
use crate::usage::total_minutes;

/// What happened on one day.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub habits_completed: usize,
    pub habits_due: usize,
    pub plan_items_completed: usize,
    pub plan_items_total: usize,
    /// Mean mood over the day's journal entries.
    pub journal_mood: Option<f64>,
    pub usage_minutes: u64,
}

pub fn day_summary(state: &StateManager, date: NaiveDate) -> DaySummary {
    let habits_due = state.active_habits().filter(|h| h.is_due_on(date)).count();
    let habits_completed = state
        .entries_for_date(date)
        .iter()
        .filter(|e| e.completed)
        .count();

    let (plan_items_completed, plan_items_total) = state
        .plan_for(date)
        .map_or((0, 0), |p| (p.completed_count(), p.items.len()));

    let journal_mood = average_mood(state.journal_entries().iter().filter(|j| j.date == date));

    let usage: Vec<_> = state.usage_for_date(date).into_iter().cloned().collect();

    DaySummary {
        date,
        habits_completed,
        habits_due,
        plan_items_completed,
        plan_items_total,
        journal_mood,
        usage_minutes: total_minutes(&usage),
    }
}

/// The seven days ending at `today`, oldest first. Days before the
/// earliest representable date are left out.
pub fn weekly_summary(state: &StateManager, today: NaiveDate) -> Vec<DaySummary> {
    (0..7)
        .rev()
        .filter_map(|back| today.checked_sub_signed(Duration::days(back)))
        .map(|date| day_summary(state, date))
        .collect()
}

/// Share of due days in `from..=to` on which the habit was completed.
///
/// Returns 0.0 when the habit was never due in the range.
///
/// # Errors
/// Returns `NotFound` for an unknown habit id.
pub fn habit_completion_rate(
    state: &StateManager,
    habit_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<f64> {
    let habit = state
        .habit(habit_id)
        .ok_or_else(|| CoreError::not_found("Habit", habit_id))?;

    let mut due = 0u32;
    let mut done = 0u32;
    for date in from.iter_days().take_while(|d| *d <= to) {
        if !habit.is_due_on(date) {
            continue;
        }
        due += 1;
        if state.entry(habit_id, date).is_some_and(|e| e.completed) {
            done += 1;
        }
    }

    Ok(if due == 0 {
        0.0
    } else {
        f64::from(done) / f64::from(due)
    })
}

pub fn average_mood<'a>(entries: impl IntoIterator<Item = &'a JournalEntry>) -> Option<f64> {
    let (sum, count) = entries
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), e| (sum + u32::from(e.mood), count + 1));
    (count > 0).then(|| f64::from(sum) / f64::from(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Frequency, Habit, HabitCategory, JournalType, SocialApp};
    use crate::storage::{Config, MemoryStore};
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn state() -> StateManager {
        StateManager::load(Box::new(MemoryStore::new()), Config::default()).unwrap()
    }

    fn old_habit(name: &str) -> Habit {
        let mut habit = Habit::new(name, HabitCategory::Fitness, Frequency::Daily).unwrap();
        habit.created_at = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        habit
    }

    #[test]
    fn day_summary_counts_everything() {
        let mut state = state();
        let a = state.add_habit(old_habit("Pushups")).unwrap().id.clone();
        state.add_habit(old_habit("Squats")).unwrap();
        state.log_habit(&a, today(), true, None).unwrap();

        let item = state.add_plan_item(today(), "Groceries", None).unwrap();
        state.add_plan_item(today(), "Taxes", None).unwrap();
        state.toggle_plan_item(today(), &item.id, today()).unwrap();

        for (kind, mood) in [(JournalType::Morning, 2), (JournalType::Evening, 5)] {
            let entry = JournalEntry::new(today(), kind, mood, 3, 3, "").unwrap();
            state.add_journal_entry(entry).unwrap();
        }
        state.record_usage(today(), SocialApp::Youtube, 40);
        state.record_usage(today(), SocialApp::Reddit, 5);

        let summary = day_summary(&state, today());
        assert_eq!(summary.habits_due, 2);
        assert_eq!(summary.habits_completed, 1);
        assert_eq!(summary.plan_items_completed, 1);
        assert_eq!(summary.plan_items_total, 2);
        assert_eq!(summary.journal_mood, Some(3.5));
        assert_eq!(summary.usage_minutes, 45);
    }

    #[test]
    fn day_summary_usage_total_is_widened() {
        let mut state = state();
        state.record_usage(today(), SocialApp::Instagram, u32::MAX);
        state.record_usage(today(), SocialApp::Tiktok, 1);

        let summary = day_summary(&state, today());
        assert_eq!(summary.usage_minutes, u64::from(u32::MAX) + 1);
    }

    #[test]
    fn weekly_summary_is_oldest_first() {
        let state = state();
        let week = weekly_summary(&state, today());
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, today() - Duration::days(6));
        assert_eq!(week[6].date, today());
        assert!(week.iter().all(|d| d.journal_mood.is_none()));
    }

    #[test]
    fn completion_rate_over_range() {
        let mut state = state();
        let id = state.add_habit(old_habit("Read")).unwrap().id.clone();
        let from = today() - Duration::days(3);
        state.log_habit(&id, from, true, None).unwrap();
        state
            .log_habit(&id, today() - Duration::days(1), true, None)
            .unwrap();
        state.log_habit(&id, today(), false, None).unwrap();

        let rate = habit_completion_rate(&state, &id, from, today()).unwrap();
        assert!((rate - 0.5).abs() < f64::EPSILON);
        assert!(habit_completion_rate(&state, "missing", from, today()).is_err());
    }

    #[test]
    fn completion_rate_is_zero_for_empty_range() {
        let mut state = state();
        let id = state.add_habit(old_habit("Read")).unwrap().id.clone();
        let rate = habit_completion_rate(&state, &id, today(), today() - Duration::days(1));
        assert_eq!(rate.unwrap(), 0.0);
    }

    #[test]
    fn average_mood_of_nothing_is_none() {
        assert_eq!(average_mood(std::iter::empty::<&JournalEntry>()), None);
    }
}
