//! Integration tests for the state manager over an in-memory store.

use chrono::{Duration, NaiveDate};
use momentum_core::gamification::BadgeId;
use momentum_core::stats::{habit_completion_rate, weekly_summary};
use momentum_core::{
    Config, Frequency, GoalCategory, GoalStatus, Habit, HabitCategory, JournalEntry, JournalType,
    LongTermGoal, MemoryStore, StateManager,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn fresh_state() -> StateManager {
    StateManager::load(Box::new(MemoryStore::new()), Config::default()).unwrap()
}

#[test]
fn test_week_of_habits_earns_week_warrior() {
    let mut state = fresh_state();
    let habit = Habit::new("Morning run", HabitCategory::Fitness, Frequency::Daily).unwrap();
    let id = state.add_habit(habit).unwrap().id.clone();

    // Log a full week ending today
    for back in (0..7).rev() {
        state
            .log_habit(&id, today() - Duration::days(back), true, None)
            .unwrap();
    }
    assert_eq!(state.habit_streak(&id, today()), 7);
    assert_eq!(state.profile().streaks.current, 7);
    assert_eq!(state.profile().streaks.longest, 7);

    let earned = state.check_achievements(today());
    let ids: Vec<BadgeId> = earned.iter().map(|a| a.badge_id).collect();
    assert_eq!(ids, vec![BadgeId::FirstStep, BadgeId::WeekWarrior]);

    // 7 completions * 10 + 2 badges * 50
    assert_eq!(state.profile().total_xp, 170);
    assert_eq!(state.profile().level, 1);
    assert_eq!(state.profile().xp_to_next_level, 80);
}

#[test]
fn test_missed_day_breaks_habit_streak() {
    let mut state = fresh_state();
    let habit = Habit::new("Flossing", HabitCategory::Health, Frequency::Daily).unwrap();
    let id = state.add_habit(habit).unwrap().id.clone();

    state.log_habit(&id, today() - Duration::days(3), true, None).unwrap();
    state.log_habit(&id, today() - Duration::days(2), true, None).unwrap();
    state.log_habit(&id, today() - Duration::days(1), false, None).unwrap();
    state.log_habit(&id, today(), true, None).unwrap();

    assert_eq!(state.habit_streak(&id, today()), 1);
}

#[test]
fn test_goal_lifecycle() {
    let mut state = fresh_state();
    let goal = LongTermGoal::new("Run a marathon", GoalCategory::Health).unwrap();
    let goal_id = state.add_goal(goal).unwrap().id.clone();

    let subtasks: Vec<String> = ["10k", "Half marathon", "Marathon"]
        .iter()
        .map(|t| state.add_subtask(&goal_id, t).unwrap().id)
        .collect();

    state.toggle_subtask(&goal_id, &subtasks[0], today()).unwrap();
    let goal = state.goal(&goal_id).unwrap();
    assert!((goal.progress - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(goal.status, GoalStatus::InProgress);

    state.toggle_subtask(&goal_id, &subtasks[1], today()).unwrap();
    let award = state.toggle_subtask(&goal_id, &subtasks[2], today()).unwrap();
    assert_eq!(award.xp, 15 + 100);

    let goal = state.goal(&goal_id).unwrap();
    assert_eq!(goal.status, GoalStatus::Completed);
    assert!(goal.completed_at.is_some());

    // Un-completing a subtask reopens the goal
    state.toggle_subtask(&goal_id, &subtasks[2], today()).unwrap();
    let goal = state.goal(&goal_id).unwrap();
    assert_eq!(goal.status, GoalStatus::InProgress);
    assert!(goal.completed_at.is_none());

    // Finishing it again pays nothing
    let award = state.toggle_subtask(&goal_id, &subtasks[2], today()).unwrap();
    assert_eq!(award.xp, 0);
    assert!(state.goal(&goal_id).unwrap().is_completed());
}

#[test]
fn test_journal_streak_and_badges() {
    let mut state = fresh_state();
    for back in 0..7 {
        let entry = JournalEntry::new(
            today() - Duration::days(back),
            JournalType::Evening,
            4,
            3,
            2,
            "Good day",
        )
        .unwrap();
        state.add_journal_entry(entry).unwrap();
    }
    assert_eq!(state.journal_streak(today()), 7);

    let earned = state.check_achievements(today());
    let ids: Vec<BadgeId> = earned.iter().map(|a| a.badge_id).collect();
    assert_eq!(ids, vec![BadgeId::ReflectiveMind, BadgeId::FirstReflection]);
    assert!(state.check_achievements(today()).is_empty());
}

#[test]
fn test_custom_level_thresholds() {
    let mut config = Config::default();
    config.set_value("gamification.level_thresholds", "[0, 20, 40]").unwrap();
    let mut state = StateManager::load(Box::new(MemoryStore::new()), config).unwrap();

    let award = state.award_xp(25, today());
    assert_eq!(award.level_up, Some(1));
    let award = state.award_xp(100, today());
    assert_eq!(award.level_up, Some(2));
    assert_eq!(state.profile().xp_to_next_level, 0);
}

#[test]
fn test_weekly_stats_reflect_logged_data() {
    let mut state = fresh_state();
    let mut habit = Habit::new("Read", HabitCategory::Learning, Frequency::Daily).unwrap();
    habit.created_at = chrono::DateTime::from_naive_utc_and_offset(
        (today() - Duration::days(30)).and_hms_opt(9, 0, 0).unwrap(),
        chrono::Utc,
    );
    let id = state.add_habit(habit).unwrap().id.clone();
    state.log_habit(&id, today(), true, None).unwrap();
    state.log_habit(&id, today() - Duration::days(2), true, None).unwrap();

    let week = weekly_summary(&state, today());
    let done: Vec<usize> = week.iter().map(|d| d.habits_completed).collect();
    assert_eq!(done, vec![0, 0, 0, 0, 1, 0, 1]);
    assert!(week.iter().all(|d| d.habits_due == 1));

    let rate = habit_completion_rate(&state, &id, today() - Duration::days(6), today()).unwrap();
    assert!((rate - 2.0 / 7.0).abs() < 1e-9);
}
