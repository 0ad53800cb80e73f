//! Social media usage sources.
//!
//! There is no real OS integration here. [`MockUsageSource`] stands in for
//! the platform usage-stats API: it enforces the permission gate and returns
//! fabricated per-app minutes.

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{SocialApp, SocialMediaUsage};
use crate::error::{CoreError, Result};
use crate::storage::Config;

/// Where per-app screen time comes from.
pub trait UsageSource {
    fn has_permission(&self) -> bool;

    /// Ask for access. Returns whether access is now granted.
    fn request_permission(&mut self) -> bool;

    /// Minutes per app for `date`.
    ///
    /// # Errors
    /// Returns [`CoreError::PermissionDenied`] when access was not granted.
    fn usage_for(&mut self, date: NaiveDate) -> Result<Vec<SocialMediaUsage>>;
}

/// Fabricated usage data behind a simulated permission prompt.
pub struct MockUsageSource {
    granted: bool,
    grant_on_request: bool,
    seed: u64,
}

impl MockUsageSource {
    /// A source whose permission prompt will be accepted.
    pub fn new(seed: u64) -> Self {
        Self {
            granted: false,
            grant_on_request: true,
            seed,
        }
    }

    /// A source whose permission prompt will be refused.
    pub fn denying(seed: u64) -> Self {
        Self {
            granted: false,
            grant_on_request: false,
            seed,
        }
    }

    pub fn granted(mut self) -> Self {
        self.granted = true;
        self
    }
}

impl UsageSource for MockUsageSource {
    fn has_permission(&self) -> bool {
        self.granted
    }

    fn request_permission(&mut self) -> bool {
        if !self.granted && self.grant_on_request {
            tracing::debug!("usage access granted");
            self.granted = true;
        }
        self.granted
    }

    fn usage_for(&mut self, date: NaiveDate) -> Result<Vec<SocialMediaUsage>> {
        if !self.granted {
            return Err(CoreError::PermissionDenied(
                "usage access has not been granted".to_string(),
            ));
        }
        // same date, same numbers
        let mut rng = StdRng::seed_from_u64(self.seed ^ date.num_days_from_ce() as u64);
        Ok(SocialApp::ALL
            .iter()
            .map(|app| SocialMediaUsage {
                date,
                app: *app,
                minutes: rng.gen_range(0..=120),
            })
            .collect())
    }
}

/// Apps whose minutes exceed their configured daily limit, with the overage.
pub fn apps_over_limit(usage: &[SocialMediaUsage], config: &Config) -> Vec<(SocialApp, u64)> {
    let mut over: Vec<(SocialApp, u64)> = Vec::new();
    for app in SocialApp::ALL {
        let Some(limit) = config.daily_limit(app) else {
            continue;
        };
        let limit = u64::from(limit);
        let minutes: u64 = usage
            .iter()
            .filter(|u| u.app == app)
            .map(|u| u64::from(u.minutes))
            .sum();
        if minutes > limit {
            over.push((app, minutes - limit));
        }
    }
    over
}

/// Sum of minutes across records. Widened so per-app maxima cannot overflow.
pub fn total_minutes(usage: &[SocialMediaUsage]) -> u64 {
    usage.iter().map(|u| u64::from(u.minutes)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn usage_requires_permission() {
        let mut source = MockUsageSource::new(3);
        assert!(!source.has_permission());
        assert!(matches!(
            source.usage_for(date()),
            Err(CoreError::PermissionDenied(_))
        ));

        assert!(source.request_permission());
        let usage = source.usage_for(date()).unwrap();
        assert_eq!(usage.len(), SocialApp::ALL.len());
        assert!(usage.iter().all(|u| u.minutes <= 120 && u.date == date()));
    }

    #[test]
    fn denied_prompt_stays_denied() {
        let mut source = MockUsageSource::denying(3);
        assert!(!source.request_permission());
        assert!(source.usage_for(date()).is_err());
    }

    #[test]
    fn same_date_gives_same_numbers() {
        let mut source = MockUsageSource::new(11).granted();
        let a = source.usage_for(date()).unwrap();
        let b = source.usage_for(date()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn over_limit_reports_overage() {
        let mut config = Config::default();
        config.usage.daily_limit_minutes.insert(SocialApp::Tiktok, 30);
        config.usage.daily_limit_minutes.remove(&SocialApp::Reddit);
        let usage = vec![
            SocialMediaUsage {
                date: date(),
                app: SocialApp::Tiktok,
                minutes: 45,
            },
            SocialMediaUsage {
                date: date(),
                app: SocialApp::Instagram,
                minutes: 20,
            },
            SocialMediaUsage {
                date: date(),
                app: SocialApp::Reddit,
                minutes: 500,
            },
        ];
        assert_eq!(apps_over_limit(&usage, &config), vec![(SocialApp::Tiktok, 15)]);
        assert_eq!(total_minutes(&usage), 565);
    }

    #[test]
    fn totals_do_not_overflow_at_u32_max() {
        let usage = vec![
            SocialMediaUsage {
                date: date(),
                app: SocialApp::Instagram,
                minutes: u32::MAX,
            },
            SocialMediaUsage {
                date: date(),
                app: SocialApp::Tiktok,
                minutes: 1,
            },
            SocialMediaUsage {
                date: date(),
                app: SocialApp::Instagram,
                minutes: u32::MAX,
            },
        ];
        assert_eq!(total_minutes(&usage), u64::from(u32::MAX) * 2 + 1);

        let over = apps_over_limit(&usage, &Config::default());
        assert_eq!(over, vec![(SocialApp::Instagram, u64::from(u32::MAX) * 2 - 60)]);
    }
}
