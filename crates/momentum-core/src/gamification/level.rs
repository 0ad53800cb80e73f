//! Level lookup against an ascending XP threshold table.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Where a total XP value sits on the level curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub xp_into_level: u64,
    /// XP still needed for the next level. Zero once the last level is reached.
    pub xp_to_next_level: u64,
    pub is_max_level: bool,
}

/// Ascending XP thresholds; index `i` is the XP needed to reach level `i`.
///
/// Serialized as a bare list. Deserializing goes through [`LevelTable::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct LevelTable {
    thresholds: Vec<u64>,
}

impl LevelTable {
    /// # Errors
    /// Returns an error unless the table is non-empty, starts at 0 and
    /// ascends strictly.
    pub fn new(thresholds: Vec<u64>) -> Result<Self, ValidationError> {
        match thresholds.first() {
            None => {
                return Err(ValidationError::InvalidThresholds(
                    "at least one threshold is required".into(),
                ))
            }
            Some(&first) if first != 0 => {
                return Err(ValidationError::InvalidThresholds(format!(
                    "first threshold must be 0, got {first}"
                )))
            }
            _ => {}
        }
        if let Some(pair) = thresholds.windows(2).find(|w| w[0] >= w[1]) {
            return Err(ValidationError::InvalidThresholds(format!(
                "thresholds must ascend strictly ({} then {})",
                pair[0], pair[1]
            )));
        }
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &[u64] {
        &self.thresholds
    }

    pub fn max_level(&self) -> u32 {
        (self.thresholds.len() - 1) as u32
    }

    /// Largest level whose threshold is at or below `total_xp`.
    pub fn level_for(&self, total_xp: u64) -> u32 {
        // thresholds[0] == 0, so the partition point is always >= 1
        (self.thresholds.partition_point(|t| *t <= total_xp) - 1) as u32
    }

    pub fn progress(&self, total_xp: u64) -> LevelProgress {
        let level = self.level_for(total_xp);
        let idx = level as usize;
        let next = self.thresholds[(idx + 1).min(self.thresholds.len() - 1)];
        LevelProgress {
            level,
            xp_into_level: total_xp - self.thresholds[idx],
            xp_to_next_level: next.saturating_sub(total_xp),
            is_max_level: level == self.max_level(),
        }
    }
}

impl TryFrom<Vec<u64>> for LevelTable {
    type Error = ValidationError;

    fn try_from(thresholds: Vec<u64>) -> Result<Self, Self::Error> {
        Self::new(thresholds)
    }
}

impl From<LevelTable> for Vec<u64> {
    fn from(table: LevelTable) -> Self {
        table.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small() -> LevelTable {
        LevelTable::new(vec![0, 100, 250]).unwrap()
    }

    #[test]
    fn mid_level_progress() {
        let p = small().progress(150);
        assert_eq!(p.level, 1);
        assert_eq!(p.xp_to_next_level, 100);
        assert_eq!(p.xp_into_level, 50);
        assert!(!p.is_max_level);
    }

    #[test]
    fn exact_threshold_enters_level() {
        assert_eq!(small().level_for(99), 0);
        assert_eq!(small().level_for(100), 1);
    }

    #[test]
    fn last_threshold_saturates() {
        let p = small().progress(250);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp_to_next_level, 0);
        assert!(p.is_max_level);

        let p = small().progress(10_000);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp_to_next_level, 0);
        assert_eq!(p.xp_into_level, 9_750);
    }

    #[test]
    fn single_threshold_table() {
        let table = LevelTable::new(vec![0]).unwrap();
        let p = table.progress(42);
        assert_eq!(p.level, 0);
        assert!(p.is_max_level);
        assert_eq!(p.xp_to_next_level, 0);
    }

    #[test]
    fn rejects_invalid_tables() {
        assert!(LevelTable::new(vec![]).is_err());
        assert!(LevelTable::new(vec![5, 10]).is_err());
        assert!(LevelTable::new(vec![0, 10, 10]).is_err());
        assert!(LevelTable::new(vec![0, 20, 10]).is_err());
    }

    #[test]
    fn deserializing_validates_thresholds() {
        let table: LevelTable = serde_json::from_str("[0, 100, 250]").unwrap();
        assert_eq!(table, small());
        assert_eq!(serde_json::to_string(&table).unwrap(), "[0,100,250]");

        assert!(serde_json::from_str::<LevelTable>("[]").is_err());
        assert!(serde_json::from_str::<LevelTable>("[10, 20]").is_err());
        assert!(serde_json::from_str::<LevelTable>("[0, 50, 50]").is_err());
    }

    proptest! {
        #[test]
        fn level_is_monotonic(a in 0u64..20_000, b in 0u64..20_000) {
            let table = LevelTable::new(vec![0, 100, 250, 500, 1000, 2000, 3500]).unwrap();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(table.level_for(lo) <= table.level_for(hi));
        }

        #[test]
        fn level_matches_bracket(total in 0u64..5_000) {
            let thresholds = vec![0u64, 100, 250, 500, 1000, 2000, 3500];
            let table = LevelTable::new(thresholds.clone()).unwrap();
            let p = table.progress(total);
            let i = p.level as usize;
            prop_assert!(thresholds[i] <= total);
            if i + 1 < thresholds.len() {
                prop_assert!(total < thresholds[i + 1]);
                prop_assert_eq!(p.xp_to_next_level, thresholds[i + 1] - total);
            }
        }
    }
}
