//! Journal entries with mood, energy and stress check-ins.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Lowest allowed mood/energy/stress score.
pub const SCORE_MIN: u8 = 1;
/// Highest allowed mood/energy/stress score.
pub const SCORE_MAX: u8 = 5;

/// Kind of journal entry. One of each may exist per date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JournalType {
    Morning,
    Evening,
    Free,
}

impl Default for JournalType {
    fn default() -> Self {
        JournalType::Free
    }
}

impl JournalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalType::Morning => "morning",
            JournalType::Evening => "evening",
            JournalType::Free => "free",
        }
    }
}

impl fmt::Display for JournalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JournalType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(JournalType::Morning),
            "evening" => Ok(JournalType::Evening),
            "free" => Ok(JournalType::Free),
            _ => Err(ValidationError::UnknownVariant {
                kind: "journal type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub entry_type: JournalType,
    pub mood: u8,
    pub energy: u8,
    pub stress: u8,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub gratitude: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// # Errors
    /// Returns an error if any score is outside `1..=5`.
    pub fn new(
        date: NaiveDate,
        entry_type: JournalType,
        mood: u8,
        energy: u8,
        stress: u8,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        check_score("mood", mood)?;
        check_score("energy", energy)?;
        check_score("stress", stress)?;
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            entry_type,
            mood,
            energy,
            stress,
            content: content.into(),
            gratitude: Vec::new(),
            created_at: Utc::now(),
        })
    }
}

fn check_score(field: &'static str, value: u8) -> Result<(), ValidationError> {
    if (SCORE_MIN..=SCORE_MAX).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min: SCORE_MIN as i64,
            max: SCORE_MAX as i64,
            value: value as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()
    }

    #[test]
    fn scores_must_be_in_range() {
        assert!(JournalEntry::new(date(), JournalType::Evening, 3, 4, 2, "ok").is_ok());

        let err = JournalEntry::new(date(), JournalType::Evening, 0, 4, 2, "").unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "mood", .. }));

        let err = JournalEntry::new(date(), JournalType::Evening, 3, 4, 6, "").unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "stress", .. }));
    }

    #[test]
    fn journal_type_round_trips_lowercase() {
        assert_eq!("Morning".parse::<JournalType>().unwrap(), JournalType::Morning);
        assert_eq!(serde_json::to_string(&JournalType::Free).unwrap(), "\"free\"");
    }
}
