//! In-memory domain state synchronized to a [`KeyValueStore`].
//!
//! [`StateManager`] is built once by the caller and passed around by
//! reference. Every mutation updates the in-memory collection first and then
//! writes that collection back under its key. A failed write is logged and
//! remembered in [`StateManager::last_persist_error`]; it never rolls back the
//! in-memory change and is not retried.

use chrono::NaiveDate;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

use crate::domain::{
    Achievement, DailyPlan, GoalStatus, GoalUpdate, Habit, HabitEntry, HabitUpdate, JournalEntry,
    LongTermGoal, PlanItem, SocialApp, SocialMediaUsage, SubTask, UserProfile,
};
use crate::error::{CoreError, Result, StorageError, ValidationError};
use crate::gamification::{
    challenge_catalog, current_streak, detect_new_achievements, longest_streak, select_challenge,
    AchievementContext, AchievementRules, CompletedChallenge, CompletionRecord, DailyChallenge,
    LevelTable,
};
use crate::storage::{keys, Config, KeyValueStore};
use crate::usage::UsageSource;

/// XP paid out by a mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Award {
    pub xp: u64,
    /// Set when the award pushed the profile into a new level.
    pub level_up: Option<u32>,
}

impl Award {
    pub fn none() -> Self {
        Self::default()
    }

    fn merge(self, other: Award) -> Award {
        Award {
            xp: self.xp + other.xp,
            level_up: other.level_up.or(self.level_up),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    Goals,
    Habits,
    HabitEntries,
    DailyPlans,
    JournalEntries,
    UserProfile,
    SocialMediaUsage,
    DailyChallenge,
    CompletedChallenges,
}

impl Collection {
    fn key(self) -> &'static str {
        match self {
            Collection::Goals => keys::GOALS,
            Collection::Habits => keys::HABITS,
            Collection::HabitEntries => keys::HABIT_ENTRIES,
            Collection::DailyPlans => keys::DAILY_PLANS,
            Collection::JournalEntries => keys::JOURNAL_ENTRIES,
            Collection::UserProfile => keys::USER_PROFILE,
            Collection::SocialMediaUsage => keys::SOCIAL_MEDIA_USAGE,
            Collection::DailyChallenge => keys::DAILY_CHALLENGE,
            Collection::CompletedChallenges => keys::COMPLETED_CHALLENGES,
        }
    }
}

fn read_collection<T>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::error!("collection '{key}' is corrupt, starting empty: {e}");
            Ok(None)
        }
    }
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|e| StorageError::Serialization {
        key: key.to_string(),
        message: e.to_string(),
    })
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField { field })
    } else {
        Ok(())
    }
}

/// Owner of every domain collection plus the store they persist to.
pub struct StateManager {
    store: Box<dyn KeyValueStore>,
    config: Config,
    levels: LevelTable,
    goals: Vec<LongTermGoal>,
    habits: Vec<Habit>,
    habit_entries: Vec<HabitEntry>,
    daily_plans: Vec<DailyPlan>,
    journal: Vec<JournalEntry>,
    usage: Vec<SocialMediaUsage>,
    profile: UserProfile,
    daily_challenge: Option<DailyChallenge>,
    completed_challenges: Vec<CompletedChallenge>,
    last_persist_error: Option<String>,
}

impl StateManager {
    /// Read every collection from `store`.
    ///
    /// Missing collections start empty. Collections that fail to decode are
    /// logged and also start empty.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or the configured level
    /// thresholds are invalid.
    pub fn load(store: Box<dyn KeyValueStore>, config: Config) -> Result<Self> {
        let levels = config.level_table()?;
        let s = store.as_ref();

        let mut profile: UserProfile = read_collection(s, keys::USER_PROFILE)?
            .unwrap_or_else(|| UserProfile::new(&levels));
        // thresholds may have changed since the profile was written
        profile.recompute_level(&levels);

        let goals: Vec<LongTermGoal> = read_collection(s, keys::GOALS)?.unwrap_or_default();
        let habits: Vec<Habit> = read_collection(s, keys::HABITS)?.unwrap_or_default();
        let habit_entries: Vec<HabitEntry> =
            read_collection(s, keys::HABIT_ENTRIES)?.unwrap_or_default();
        let daily_plans: Vec<DailyPlan> =
            read_collection(s, keys::DAILY_PLANS)?.unwrap_or_default();
        let journal: Vec<JournalEntry> =
            read_collection(s, keys::JOURNAL_ENTRIES)?.unwrap_or_default();
        let usage: Vec<SocialMediaUsage> =
            read_collection(s, keys::SOCIAL_MEDIA_USAGE)?.unwrap_or_default();
        // stored as `null` once cleared
        let daily_challenge =
            read_collection::<Option<DailyChallenge>>(s, keys::DAILY_CHALLENGE)?.flatten();
        let completed_challenges: Vec<CompletedChallenge> =
            read_collection(s, keys::COMPLETED_CHALLENGES)?.unwrap_or_default();

        let state = Self {
            goals,
            habits,
            habit_entries,
            daily_plans,
            journal,
            usage,
            daily_challenge,
            completed_challenges,
            profile,
            levels,
            config,
            store,
            last_persist_error: None,
        };
        tracing::debug!(
            habits = state.habits.len(),
            goals = state.goals.len(),
            journal = state.journal.len(),
            "state loaded"
        );
        Ok(state)
    }

    fn persist(&mut self, collection: Collection) {
        let key = collection.key();
        let encoded = match collection {
            Collection::Goals => encode(key, &self.goals),
            Collection::Habits => encode(key, &self.habits),
            Collection::HabitEntries => encode(key, &self.habit_entries),
            Collection::DailyPlans => encode(key, &self.daily_plans),
            Collection::JournalEntries => encode(key, &self.journal),
            Collection::UserProfile => encode(key, &self.profile),
            Collection::SocialMediaUsage => encode(key, &self.usage),
            Collection::DailyChallenge => encode(key, &self.daily_challenge),
            Collection::CompletedChallenges => encode(key, &self.completed_challenges),
        };
        let result = encoded.and_then(|json| self.store.set(key, &json));
        match result {
            Ok(()) => tracing::debug!("persisted {key}"),
            Err(e) => {
                tracing::error!("failed to persist {key}: {e}");
                self.last_persist_error = Some(format!("{key}: {e}"));
            }
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// The most recent failed write, if any.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    pub fn take_persist_error(&mut self) -> Option<String> {
        self.last_persist_error.take()
    }

    // ── Profile & XP ────────────────────────────────────────────────────

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn level_table(&self) -> &LevelTable {
        &self.levels
    }

    /// Credit `amount` XP for activity on `date`.
    pub fn award_xp(&mut self, amount: u64, date: NaiveDate) -> Award {
        if amount == 0 {
            return Award::none();
        }
        let level_up = self.profile.award_xp(amount, &self.levels);
        self.profile.record_activity(date);
        if let Some(level) = level_up {
            tracing::info!(level, total_xp = self.profile.total_xp, "level up");
        }
        self.persist(Collection::UserProfile);
        Award {
            xp: amount,
            level_up,
        }
    }

    /// Detect, record and pay out newly earned badges.
    pub fn check_achievements(&mut self, today: NaiveDate) -> Vec<Achievement> {
        let rules = AchievementRules::from(&self.config);
        let earned = {
            let ctx = AchievementContext {
                profile: &self.profile,
                habits: &self.habits,
                entries: &self.habit_entries,
                goals: &self.goals,
                journal: &self.journal,
                today,
            };
            detect_new_achievements(&ctx, &rules)
        };

        for achievement in &earned {
            tracing::info!(badge = %achievement.badge_id, "achievement unlocked");
            self.profile.add_achievement(achievement.clone());
            self.profile.award_xp(achievement.xp_reward, &self.levels);
        }
        if !earned.is_empty() {
            self.persist(Collection::UserProfile);
        }
        earned
    }

    // ── Habits ──────────────────────────────────────────────────────────

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn active_habits(&self) -> impl Iterator<Item = &Habit> {
        self.habits.iter().filter(|h| h.active)
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    fn habit_index(&self, id: &str) -> Result<usize> {
        self.habits
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CoreError::not_found("Habit", id))
    }

    pub fn add_habit(&mut self, habit: Habit) -> Result<&Habit> {
        require_text("name", &habit.name)?;
        let idx = self.habits.len();
        self.habits.push(habit);
        self.persist(Collection::Habits);
        Ok(&self.habits[idx])
    }

    pub fn update_habit(&mut self, id: &str, update: HabitUpdate) -> Result<&Habit> {
        let idx = self.habit_index(id)?;
        if let Some(name) = &update.name {
            require_text("name", name)?;
        }

        let habit = &mut self.habits[idx];
        if let Some(name) = update.name {
            habit.name = name;
        }
        if let Some(description) = update.description {
            habit.description = Some(description);
        }
        if let Some(category) = update.category {
            habit.category = category;
        }
        if let Some(frequency) = update.frequency {
            habit.frequency = frequency;
        }
        if let Some(target) = update.target_count {
            habit.target_count = Some(target);
        }
        if let Some(active) = update.active {
            habit.active = active;
        }
        self.persist(Collection::Habits);
        Ok(&self.habits[idx])
    }

    /// Remove a habit along with all of its entries.
    pub fn delete_habit(&mut self, id: &str) -> Result<Habit> {
        let idx = self.habit_index(id)?;
        let habit = self.habits.remove(idx);
        let before = self.habit_entries.len();
        self.habit_entries.retain(|e| e.habit_id != id);

        self.persist(Collection::Habits);
        if self.habit_entries.len() != before {
            self.persist(Collection::HabitEntries);
        }
        Ok(habit)
    }

    pub fn habit_entries(&self) -> &[HabitEntry] {
        &self.habit_entries
    }

    pub fn entries_for_date(&self, date: NaiveDate) -> Vec<&HabitEntry> {
        self.habit_entries.iter().filter(|e| e.date == date).collect()
    }

    pub fn entry(&self, habit_id: &str, date: NaiveDate) -> Option<&HabitEntry> {
        self.habit_entries
            .iter()
            .find(|e| e.habit_id == habit_id && e.date == date)
    }

    /// Upsert the single entry for `(habit_id, date)`.
    ///
    /// XP is paid the first time the entry is marked completed.
    pub fn log_habit(
        &mut self,
        habit_id: &str,
        date: NaiveDate,
        completed: bool,
        count: Option<u32>,
    ) -> Result<(HabitEntry, Award)> {
        self.habit_index(habit_id)?;

        let existing = self
            .habit_entries
            .iter()
            .position(|e| e.habit_id == habit_id && e.date == date);
        let i = match existing {
            Some(i) => i,
            None => {
                self.habit_entries.push(HabitEntry::new(habit_id, date, completed));
                self.habit_entries.len() - 1
            }
        };
        let entry = &mut self.habit_entries[i];
        entry.completed = completed;
        if count.is_some() {
            entry.count = count;
        }
        let pay = completed && !entry.xp_awarded;
        entry.xp_awarded |= pay;
        let entry = entry.clone();
        self.persist(Collection::HabitEntries);

        let award = if pay {
            self.award_xp(self.config.xp.habit_completion, date)
        } else {
            Award::none()
        };
        Ok((entry, award))
    }

    /// Flip the completion state for `(habit_id, date)`.
    pub fn toggle_habit(&mut self, habit_id: &str, date: NaiveDate) -> Result<(HabitEntry, Award)> {
        let completed = self.entry(habit_id, date).map_or(false, |e| e.completed);
        self.log_habit(habit_id, date, !completed, None)
    }

    pub fn habit_streak(&self, habit_id: &str, today: NaiveDate) -> u32 {
        current_streak(
            self.habit_entries
                .iter()
                .filter(|e| e.habit_id == habit_id)
                .map(|e| CompletionRecord::new(e.date, e.completed)),
            today,
        )
    }

    /// Longest run of completed days anywhere in the habit's history.
    pub fn habit_longest_streak(&self, habit_id: &str) -> u32 {
        longest_streak(
            self.habit_entries
                .iter()
                .filter(|e| e.habit_id == habit_id)
                .map(|e| CompletionRecord::new(e.date, e.completed)),
        )
    }

    // ── Goals ───────────────────────────────────────────────────────────

    pub fn goals(&self) -> &[LongTermGoal] {
        &self.goals
    }

    pub fn goal(&self, id: &str) -> Option<&LongTermGoal> {
        self.goals.iter().find(|g| g.id == id)
    }

    fn goal_index(&self, id: &str) -> Result<usize> {
        self.goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| CoreError::not_found("Goal", id))
    }

    pub fn add_goal(&mut self, mut goal: LongTermGoal) -> Result<&LongTermGoal> {
        require_text("title", &goal.title)?;
        goal.sync_progress_from_subtasks();
        let idx = self.goals.len();
        self.goals.push(goal);
        self.persist(Collection::Goals);
        Ok(&self.goals[idx])
    }

    pub fn update_goal(&mut self, id: &str, update: GoalUpdate) -> Result<&LongTermGoal> {
        let idx = self.goal_index(id)?;
        if let Some(title) = &update.title {
            require_text("title", title)?;
        }

        let goal = &mut self.goals[idx];
        if let Some(title) = update.title {
            goal.title = title;
        }
        if let Some(description) = update.description {
            goal.description = Some(description);
        }
        if let Some(category) = update.category {
            goal.category = category;
        }
        if let Some(date) = update.target_date {
            goal.target_date = Some(date);
        }
        self.persist(Collection::Goals);
        Ok(&self.goals[idx])
    }

    /// Remove a goal and unlink any plan items pointing at it.
    pub fn delete_goal(&mut self, id: &str) -> Result<LongTermGoal> {
        let idx = self.goal_index(id)?;
        let goal = self.goals.remove(idx);

        let mut unlinked = false;
        for item in self.daily_plans.iter_mut().flat_map(|p| p.items.iter_mut()) {
            if item.goal_id.as_deref() == Some(id) {
                item.goal_id = None;
                unlinked = true;
            }
        }

        self.persist(Collection::Goals);
        if unlinked {
            self.persist(Collection::DailyPlans);
        }
        Ok(goal)
    }

    pub fn add_subtask(&mut self, goal_id: &str, title: &str) -> Result<SubTask> {
        require_text("title", title)?;
        let idx = self.goal_index(goal_id)?;
        let subtask = SubTask::new(title);
        let goal = &mut self.goals[idx];
        goal.subtasks.push(subtask.clone());
        goal.sync_progress_from_subtasks();
        self.persist(Collection::Goals);
        Ok(subtask)
    }

    /// Flip a subtask and re-derive the goal's progress and status.
    pub fn toggle_subtask(
        &mut self,
        goal_id: &str,
        subtask_id: &str,
        today: NaiveDate,
    ) -> Result<Award> {
        let idx = self.goal_index(goal_id)?;
        let goal = &mut self.goals[idx];
        let subtask = goal
            .subtasks
            .iter_mut()
            .find(|s| s.id == subtask_id)
            .ok_or_else(|| CoreError::not_found("Subtask", subtask_id))?;
        subtask.completed = !subtask.completed;
        let pay_subtask = subtask.completed && !subtask.xp_awarded;
        subtask.xp_awarded |= pay_subtask;
        goal.sync_progress_from_subtasks();
        let pay_goal = goal.claim_completion_xp();
        self.persist(Collection::Goals);

        let mut award = Award::none();
        if pay_subtask {
            award = award.merge(self.award_xp(self.config.xp.subtask_completion, today));
        }
        Ok(award.merge(self.goal_completion_award(pay_goal, today)))
    }

    pub fn set_goal_status(
        &mut self,
        id: &str,
        status: GoalStatus,
        today: NaiveDate,
    ) -> Result<Award> {
        let idx = self.goal_index(id)?;
        let goal = &mut self.goals[idx];
        goal.mark_status(status);
        let pay = goal.claim_completion_xp();
        self.persist(Collection::Goals);
        Ok(self.goal_completion_award(pay, today))
    }

    /// Set progress directly. Intended for goals without subtasks.
    pub fn set_goal_progress(
        &mut self,
        id: &str,
        progress: f64,
        today: NaiveDate,
    ) -> Result<Award> {
        let idx = self.goal_index(id)?;
        let goal = &mut self.goals[idx];
        goal.set_progress(progress);
        let pay = goal.claim_completion_xp();
        self.persist(Collection::Goals);
        Ok(self.goal_completion_award(pay, today))
    }

    fn goal_completion_award(&mut self, pay: bool, today: NaiveDate) -> Award {
        if pay {
            self.award_xp(self.config.xp.goal_completion, today)
        } else {
            Award::none()
        }
    }

    // ── Daily plans ─────────────────────────────────────────────────────

    pub fn daily_plans(&self) -> &[DailyPlan] {
        &self.daily_plans
    }

    pub fn plan_for(&self, date: NaiveDate) -> Option<&DailyPlan> {
        self.daily_plans.iter().find(|p| p.date == date)
    }

    fn plan_mut(&mut self, date: NaiveDate) -> Result<&mut DailyPlan> {
        self.daily_plans
            .iter_mut()
            .find(|p| p.date == date)
            .ok_or_else(|| CoreError::not_found("Daily plan", date.to_string()))
    }

    pub fn add_plan_item(
        &mut self,
        date: NaiveDate,
        title: &str,
        goal_id: Option<String>,
    ) -> Result<PlanItem> {
        if let Some(goal_id) = &goal_id {
            self.goal_index(goal_id)?;
        }
        let item = PlanItem::new(title, goal_id)?;

        match self.daily_plans.iter_mut().find(|p| p.date == date) {
            Some(plan) => plan.items.push(item.clone()),
            None => {
                let mut plan = DailyPlan::new(date);
                plan.items.push(item.clone());
                self.daily_plans.push(plan);
            }
        }
        self.persist(Collection::DailyPlans);
        Ok(item)
    }

    pub fn toggle_plan_item(
        &mut self,
        date: NaiveDate,
        item_id: &str,
        today: NaiveDate,
    ) -> Result<Award> {
        let item = self
            .plan_mut(date)?
            .item_mut(item_id)
            .ok_or_else(|| CoreError::not_found("Plan item", item_id))?;
        item.completed = !item.completed;
        let pay = item.completed && !item.xp_awarded;
        item.xp_awarded |= pay;
        self.persist(Collection::DailyPlans);

        Ok(if pay {
            self.award_xp(self.config.xp.plan_item, today)
        } else {
            Award::none()
        })
    }

    /// Remove an item; a plan left empty is dropped.
    pub fn remove_plan_item(&mut self, date: NaiveDate, item_id: &str) -> Result<PlanItem> {
        let plan = self.plan_mut(date)?;
        let pos = plan
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| CoreError::not_found("Plan item", item_id))?;
        let item = plan.items.remove(pos);
        self.daily_plans.retain(|p| !p.items.is_empty());
        self.persist(Collection::DailyPlans);
        Ok(item)
    }

    // ── Journal ─────────────────────────────────────────────────────────

    pub fn journal_entries(&self) -> &[JournalEntry] {
        &self.journal
    }

    /// Store an entry, replacing any entry of the same type on the same date.
    ///
    /// XP is only paid for the first entry of a `(date, type)` pair.
    pub fn add_journal_entry(&mut self, entry: JournalEntry) -> Result<Award> {
        // re-validate: entries may be built without the constructor
        JournalEntry::new(
            entry.date,
            entry.entry_type,
            entry.mood,
            entry.energy,
            entry.stress,
            String::new(),
        )?;

        let date = entry.date;
        let existing = self
            .journal
            .iter()
            .position(|j| j.date == entry.date && j.entry_type == entry.entry_type);
        let replaced = match existing {
            Some(i) => {
                self.journal[i] = entry;
                true
            }
            None => {
                self.journal.push(entry);
                false
            }
        };
        self.persist(Collection::JournalEntries);

        Ok(if replaced {
            Award::none()
        } else {
            self.award_xp(self.config.xp.journal_entry, date)
        })
    }

    pub fn delete_journal_entry(&mut self, id: &str) -> Result<JournalEntry> {
        let pos = self
            .journal
            .iter()
            .position(|j| j.id == id)
            .ok_or_else(|| CoreError::not_found("Journal entry", id))?;
        let entry = self.journal.remove(pos);
        self.persist(Collection::JournalEntries);
        Ok(entry)
    }

    /// Entries dated within `from..=to`, oldest first.
    pub fn journal_entries_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&JournalEntry> {
        let mut entries: Vec<&JournalEntry> = self
            .journal
            .iter()
            .filter(|j| j.date >= from && j.date <= to)
            .collect();
        entries.sort_by_key(|j| (j.date, j.created_at));
        entries
    }

    pub fn journal_streak(&self, today: NaiveDate) -> u32 {
        current_streak(
            self.journal.iter().map(|j| CompletionRecord::new(j.date, true)),
            today,
        )
    }

    // ── Social media usage ──────────────────────────────────────────────

    pub fn usage(&self) -> &[SocialMediaUsage] {
        &self.usage
    }

    pub fn usage_for_date(&self, date: NaiveDate) -> Vec<&SocialMediaUsage> {
        self.usage.iter().filter(|u| u.date == date).collect()
    }

    /// Add minutes to the `(date, app)` record.
    pub fn record_usage(
        &mut self,
        date: NaiveDate,
        app: SocialApp,
        minutes: u32,
    ) -> &SocialMediaUsage {
        let idx = match self.usage.iter().position(|u| u.date == date && u.app == app) {
            Some(i) => {
                self.usage[i].minutes = self.usage[i].minutes.saturating_add(minutes);
                i
            }
            None => {
                self.usage.push(SocialMediaUsage { date, app, minutes });
                self.usage.len() - 1
            }
        };
        self.persist(Collection::SocialMediaUsage);
        &self.usage[idx]
    }

    /// Replace `date`'s usage with what `source` reports.
    ///
    /// # Errors
    /// Returns [`CoreError::PermissionDenied`] if the source refuses access.
    pub fn sync_usage(
        &mut self,
        source: &mut dyn UsageSource,
        date: NaiveDate,
    ) -> Result<Vec<SocialMediaUsage>> {
        if !source.has_permission() && !source.request_permission() {
            return Err(CoreError::PermissionDenied(
                "usage access is required to sync screen time".to_string(),
            ));
        }
        let fresh = source.usage_for(date)?;
        self.usage.retain(|u| u.date != date);
        self.usage.extend(fresh.iter().cloned());
        self.persist(Collection::SocialMediaUsage);
        Ok(fresh)
    }

    // ── Daily challenge ─────────────────────────────────────────────────

    pub fn completed_challenges(&self) -> &[CompletedChallenge] {
        &self.completed_challenges
    }

    /// Today's challenge, choosing and storing one if none exists yet.
    pub fn todays_challenge<R: Rng + ?Sized>(
        &mut self,
        today: NaiveDate,
        rng: &mut R,
    ) -> Option<&DailyChallenge> {
        let current = self
            .daily_challenge
            .as_ref()
            .map_or(false, |c| c.date == today);
        if !current {
            let reset_daily = self.config.challenges.reset_daily;
            let completed: HashSet<&str> = self
                .completed_challenges
                .iter()
                .filter(|c| !reset_daily || c.date == today)
                .map(|c| c.template_id.as_str())
                .collect();
            let picked = select_challenge(challenge_catalog(), &completed, rng)
                .map(|t| DailyChallenge::from_template(t, today));
            if let Some(challenge) = &picked {
                tracing::debug!(challenge = %challenge.template_id, "selected daily challenge");
            }
            self.daily_challenge = picked;
            self.persist(Collection::DailyChallenge);
        }
        self.daily_challenge.as_ref()
    }

    /// Mark today's challenge done and pay its reward.
    ///
    /// # Errors
    /// Returns `NotFound` if no challenge has been selected for `today`.
    pub fn complete_challenge(&mut self, today: NaiveDate) -> Result<Award> {
        let challenge = self
            .daily_challenge
            .as_mut()
            .filter(|c| c.date == today)
            .ok_or_else(|| CoreError::not_found("Daily challenge", today.to_string()))?;
        if challenge.completed {
            return Ok(Award::none());
        }
        challenge.completed = true;
        let reward = challenge.xp_reward;
        self.completed_challenges.push(CompletedChallenge {
            template_id: challenge.template_id.clone(),
            date: today,
        });
        self.persist(Collection::DailyChallenge);
        self.persist(Collection::CompletedChallenges);
        Ok(self.award_xp(reward, today))
    }

    // ── Maintenance ─────────────────────────────────────────────────────

    /// Reset in-memory state and remove every collection from the store.
    ///
    /// Memory is always reset. Every key is attempted even after a failed
    /// removal; the last failure is kept like a failed write.
    pub fn clear_all_data(&mut self) {
        self.goals.clear();
        self.habits.clear();
        self.habit_entries.clear();
        self.daily_plans.clear();
        self.journal.clear();
        self.usage.clear();
        self.daily_challenge = None;
        self.completed_challenges.clear();
        self.profile = UserProfile::new(&self.levels);
        self.last_persist_error = None;

        for key in keys::ALL {
            if let Err(e) = self.store.remove(key) {
                tracing::error!("failed to remove {key}: {e}");
                self.last_persist_error = Some(format!("{key}: {e}"));
            }
        }
        tracing::info!("all data cleared");
    }
}
