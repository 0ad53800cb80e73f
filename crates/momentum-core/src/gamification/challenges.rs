//! Daily challenge catalog and selection.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A challenge that can be offered for a day.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ChallengeTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub xp_reward: u64,
}

static CATALOG: [ChallengeTemplate; 8] = [
    ChallengeTemplate {
        id: "no_social_hour",
        title: "Offline Hour",
        description: "Stay off social media for one full hour",
        xp_reward: 30,
    },
    ChallengeTemplate {
        id: "gratitude_three",
        title: "Three Good Things",
        description: "Write down three things you are grateful for",
        xp_reward: 20,
    },
    ChallengeTemplate {
        id: "walk_outside",
        title: "Fresh Air",
        description: "Take a 20 minute walk outside",
        xp_reward: 25,
    },
    ChallengeTemplate {
        id: "hydrate",
        title: "Hydration Check",
        description: "Drink eight glasses of water",
        xp_reward: 15,
    },
    ChallengeTemplate {
        id: "early_lights_out",
        title: "Early Lights Out",
        description: "Be in bed before 11pm with no screens",
        xp_reward: 30,
    },
    ChallengeTemplate {
        id: "deep_focus",
        title: "Deep Focus",
        description: "Work on one task for 45 minutes without switching",
        xp_reward: 35,
    },
    ChallengeTemplate {
        id: "reach_out",
        title: "Reach Out",
        description: "Message a friend you haven't talked to in a while",
        xp_reward: 20,
    },
    ChallengeTemplate {
        id: "plan_tomorrow",
        title: "Plan Ahead",
        description: "Write tomorrow's plan before going to bed",
        xp_reward: 15,
    },
];

pub fn challenge_catalog() -> &'static [ChallengeTemplate] {
    &CATALOG
}

pub fn find_challenge(id: &str) -> Option<&'static ChallengeTemplate> {
    CATALOG.iter().find(|c| c.id == id)
}

/// The challenge chosen for a particular date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyChallenge {
    pub template_id: String,
    pub title: String,
    pub description: String,
    pub xp_reward: u64,
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

impl DailyChallenge {
    pub fn from_template(template: &ChallengeTemplate, date: NaiveDate) -> Self {
        Self {
            template_id: template.id.to_string(),
            title: template.title.to_string(),
            description: template.description.to_string(),
            xp_reward: template.xp_reward,
            date,
            completed: false,
        }
    }
}

/// A finished challenge, kept for exclusion on later days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletedChallenge {
    pub template_id: String,
    pub date: NaiveDate,
}

/// Pick uniformly among templates whose id is not in `completed`.
///
/// Falls back to the whole catalog once everything has been completed.
/// Returns `None` only for an empty catalog.
pub fn select_challenge<'a, R>(
    catalog: &'a [ChallengeTemplate],
    completed: &HashSet<&str>,
    rng: &mut R,
) -> Option<&'a ChallengeTemplate>
where
    R: Rng + ?Sized,
{
    let remaining: Vec<&ChallengeTemplate> = catalog
        .iter()
        .filter(|c| !completed.contains(c.id))
        .collect();

    if remaining.is_empty() {
        catalog.choose(rng)
    } else {
        remaining.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn last_uncompleted_template_is_always_chosen() {
        let catalog = challenge_catalog();
        let completed: HashSet<&str> = catalog.iter().skip(1).map(|c| c.id).collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let pick = select_challenge(catalog, &completed, &mut rng).unwrap();
            assert_eq!(pick.id, catalog[0].id);
        }
    }

    #[test]
    fn all_completed_falls_back_to_catalog() {
        let catalog = challenge_catalog();
        let completed: HashSet<&str> = catalog.iter().map(|c| c.id).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let pick = select_challenge(catalog, &completed, &mut rng).unwrap();
        assert!(catalog.iter().any(|c| c.id == pick.id));
    }

    #[test]
    fn never_picks_completed_while_others_remain() {
        let catalog = challenge_catalog();
        let completed: HashSet<&str> = catalog.iter().take(5).map(|c| c.id).collect();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let pick = select_challenge(catalog, &completed, &mut rng).unwrap();
            assert!(!completed.contains(pick.id));
        }
    }

    #[test]
    fn empty_catalog_yields_none() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(select_challenge(&[], &HashSet::new(), &mut rng).is_none());
    }

    #[test]
    fn catalog_ids_are_unique_and_findable() {
        let ids: HashSet<&str> = challenge_catalog().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), challenge_catalog().len());
        assert_eq!(find_challenge("hydrate").unwrap().xp_reward, 15);
        assert!(find_challenge("juggle").is_none());
    }
}
