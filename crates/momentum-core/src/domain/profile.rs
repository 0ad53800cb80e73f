//! The user's gamification profile.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::gamification::{BadgeId, LevelTable};

/// Day-level activity streak.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Streaks {
    pub current: u32,
    pub longest: u32,
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
}

/// A badge earned by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Achievement {
    pub id: String,
    pub badge_id: BadgeId,
    pub name: String,
    pub xp_reward: u64,
    pub earned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub level: u32,
    /// Progress into the current level.
    pub xp: u64,
    pub total_xp: u64,
    pub xp_to_next_level: u64,
    #[serde(default)]
    pub streaks: Streaks,
    #[serde(default)]
    pub badges: Vec<Achievement>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(table: &LevelTable) -> Self {
        let mut profile = Self {
            level: 0,
            xp: 0,
            total_xp: 0,
            xp_to_next_level: 0,
            streaks: Streaks::default(),
            badges: Vec::new(),
            created_at: Utc::now(),
        };
        profile.recompute_level(table);
        profile
    }

    pub fn has_badge(&self, badge: BadgeId) -> bool {
        self.badges.iter().any(|a| a.badge_id == badge)
    }

    /// Add XP and refresh the derived level fields.
    ///
    /// Returns the new level when this award crossed a threshold.
    pub fn award_xp(&mut self, amount: u64, table: &LevelTable) -> Option<u32> {
        let before = self.level;
        self.total_xp = self.total_xp.saturating_add(amount);
        self.recompute_level(table);
        (self.level > before).then_some(self.level)
    }

    /// Derive level, xp and xp_to_next_level from total_xp.
    pub fn recompute_level(&mut self, table: &LevelTable) {
        let progress = table.progress(self.total_xp);
        self.level = progress.level;
        self.xp = progress.xp_into_level;
        self.xp_to_next_level = progress.xp_to_next_level;
    }

    /// Record that the user did something on `today`.
    pub fn record_activity(&mut self, today: NaiveDate) {
        match self.streaks.last_active_date {
            Some(last) if last == today => return,
            Some(last) if last.succ_opt() == Some(today) => self.streaks.current += 1,
            Some(last) if last > today => return,
            _ => self.streaks.current = 1,
        }
        self.streaks.longest = self.streaks.longest.max(self.streaks.current);
        self.streaks.last_active_date = Some(today);
    }

    /// Append an achievement unless its badge is already held.
    pub fn add_achievement(&mut self, achievement: Achievement) -> bool {
        if self.has_badge(achievement.badge_id) {
            return false;
        }
        self.badges.push(achievement);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LevelTable {
        LevelTable::new(vec![0, 100, 250]).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    #[test]
    fn new_profile_starts_at_level_zero() {
        let profile = UserProfile::new(&table());
        assert_eq!(profile.level, 0);
        assert_eq!(profile.xp_to_next_level, 100);
    }

    #[test]
    fn award_xp_reports_level_up_once() {
        let mut profile = UserProfile::new(&table());
        assert_eq!(profile.award_xp(60, &table()), None);
        assert_eq!(profile.award_xp(90, &table()), Some(1));
        assert_eq!(profile.total_xp, 150);
        assert_eq!(profile.xp, 50);
        assert_eq!(profile.xp_to_next_level, 100);
        assert_eq!(profile.award_xp(10, &table()), None);
    }

    #[test]
    fn activity_streak_extends_and_resets() {
        let mut profile = UserProfile::new(&table());
        profile.record_activity(day(1));
        profile.record_activity(day(2));
        profile.record_activity(day(2));
        profile.record_activity(day(3));
        assert_eq!(profile.streaks.current, 3);

        profile.record_activity(day(6));
        assert_eq!(profile.streaks.current, 1);
        assert_eq!(profile.streaks.longest, 3);
        assert_eq!(profile.streaks.last_active_date, Some(day(6)));
    }

    #[test]
    fn activity_on_last_representable_day() {
        let mut profile = UserProfile::new(&table());
        profile.record_activity(NaiveDate::MAX);
        profile.record_activity(day(1));
        assert_eq!(profile.streaks.current, 1);
        assert_eq!(profile.streaks.last_active_date, Some(NaiveDate::MAX));
    }

    #[test]
    fn achievements_are_unique_by_badge() {
        let mut profile = UserProfile::new(&table());
        let achievement = Achievement {
            id: "a1".into(),
            badge_id: BadgeId::FirstStep,
            name: "First Step".into(),
            xp_reward: 50,
            earned_at: Utc::now(),
        };
        assert!(profile.add_achievement(achievement.clone()));
        assert!(!profile.add_achievement(Achievement {
            id: "a2".into(),
            ..achievement
        }));
        assert_eq!(profile.badges.len(), 1);
    }
}
