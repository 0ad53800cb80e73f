//! Pure gamification rules: levels, streaks, badges and daily challenges.

pub mod achievements;
pub mod challenges;
pub mod level;
pub mod streak;

pub use achievements::{
    badge_catalog, detect_new_achievements, AchievementContext, AchievementRules, Badge, BadgeId,
};
pub use challenges::{
    challenge_catalog, find_challenge, select_challenge, ChallengeTemplate, CompletedChallenge,
    DailyChallenge,
};
pub use level::{LevelProgress, LevelTable};
pub use streak::{current_streak, longest_streak, CompletionRecord};
