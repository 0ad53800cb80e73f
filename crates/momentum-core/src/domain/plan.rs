//! Daily plans: the list of things intended for one date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
    /// Long-term goal this item moves forward, if any.
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub xp_awarded: bool,
}

impl PlanItem {
    pub fn new(title: impl Into<String>, goal_id: Option<String>) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "title" });
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            completed: false,
            goal_id,
            xp_awarded: false,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyPlan {
    pub date: NaiveDate,
    #[serde(default)]
    pub items: Vec<PlanItem>,
}

impl DailyPlan {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            items: Vec::new(),
        }
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|i| i.completed).count()
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut PlanItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_counts_completed_items() {
        let mut plan = DailyPlan::new(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        plan.items.push(PlanItem::new("Groceries", None).unwrap());
        plan.items.push(PlanItem::new("Call mom", None).unwrap());
        let id = plan.items[1].id.clone();
        plan.item_mut(&id).unwrap().completed = true;
        assert_eq!(plan.completed_count(), 1);
        assert!(plan.item_mut("missing").is_none());
    }

    #[test]
    fn plan_item_requires_title() {
        assert!(PlanItem::new(" ", None).is_err());
    }
}
