//! Consecutive-day streak counting over dated completion records.
//!
//! Records are reduced to the set of distinct qualifying dates before any
//! walking happens, so several completions on one day count once.

use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use std::collections::BTreeSet;

/// A dated record that may or may not count toward a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionRecord {
    pub date: NaiveDate,
    pub qualifies: bool,
}

impl CompletionRecord {
    pub fn new(date: NaiveDate, qualifies: bool) -> Self {
        Self { date, qualifies }
    }

    /// Build from a timestamp, dropping the time of day in its own zone.
    pub fn at<Tz: TimeZone>(at: &DateTime<Tz>, qualifies: bool) -> Self {
        Self {
            date: at.date_naive(),
            qualifies,
        }
    }
}

fn qualifying_dates<I>(records: I) -> BTreeSet<NaiveDate>
where
    I: IntoIterator<Item = CompletionRecord>,
{
    records
        .into_iter()
        .filter(|r| r.qualifies)
        .map(|r| r.date)
        .collect()
}

/// Number of consecutive days, ending today, with a qualifying record.
///
/// Walks backward from `today`; the first day without a qualifying record
/// ends the streak. Records dated after `today` are ignored.
pub fn current_streak<I>(records: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = CompletionRecord>,
{
    let dates = qualifying_dates(records);
    let mut streak = 0u32;
    for (i, date) in dates.range(..=today).rev().enumerate() {
        let expected = today - Duration::days(i as i64);
        if *date != expected {
            break;
        }
        streak += 1;
    }
    streak
}

/// Longest run of consecutive qualifying days anywhere in the history.
pub fn longest_streak<I>(records: I) -> u32
where
    I: IntoIterator<Item = CompletionRecord>,
{
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for date in qualifying_dates(records) {
        run = match prev {
            Some(p) if p + Duration::days(1) == date => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }
    longest
}
