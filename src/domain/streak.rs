/// Streak calculation and classification
///
/// This module computes the current and longest streak for a habit from its
/// completion history, and classifies the pair for display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use chrono::{Duration, NaiveDate};
use crate::domain::{CompletionRecord, CompletionState};

/// Calculated streak information for a habit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakResult {
    /// Consecutive done days ending today
    pub current: u32,
    /// Longest run of consecutive done days ever recorded
    pub longest: u32,
}

impl StreakResult {
    /// Calculate both streaks from the full recorded history of one habit
    ///
    /// `history` may be in any order. The current streak walks back from
    /// `today` with no lower bound; it ends at the first day that isn't
    /// marked done.
    pub fn from_history(history: &[CompletionRecord], today: NaiveDate) -> Self {
        let by_date: BTreeMap<NaiveDate, bool> = history
            .iter()
            .map(|record| (record.date, record.done))
            .collect();

        let current = current_streak(today, |date| {
            CompletionState::from_record(by_date.get(&date).copied())
        });
        let longest = longest_streak(by_date.iter().map(|(date, done)| (*date, *done)));

        Self { current, longest }
    }

    /// Display classification for this pair
    pub fn class(&self) -> StreakClass {
        StreakClass::classify(self.current, self.longest)
    }
}

/// Display state derived from a (current, longest) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakClass {
    /// The current streak is the best ever
    Matched,
    /// A streak is running, but a longer one exists in the past
    Behind,
    /// No streak is running
    None,
}

impl StreakClass {
    pub fn classify(current: u32, longest: u32) -> Self {
        if current == 0 {
            StreakClass::None
        } else if current >= longest {
            StreakClass::Matched
        } else {
            StreakClass::Behind
        }
    }
}

/// Count consecutive done days walking backwards from `today`
///
/// `lookup` is asked for one day at a time, today first. The scan stops at
/// the first day that is not `Done`.
pub fn current_streak<F>(today: NaiveDate, mut lookup: F) -> u32
where
    F: FnMut(NaiveDate) -> CompletionState,
{
    let mut streak = 0;
    let mut checking_date = today;

    while lookup(checking_date).is_done() {
        streak += 1;
        checking_date = match checking_date.checked_sub_signed(Duration::days(1)) {
            Some(previous) => previous,
            None => break,
        };
    }

    streak
}

/// Longest run of consecutive done days
///
/// `records` must be sorted by date ascending with no duplicate dates.
/// A not-done record and a missing day both end a run.
pub fn longest_streak<I>(records: I) -> u32
where
    I: IntoIterator<Item = (NaiveDate, bool)>,
{
    let mut longest = 0;
    let mut run = 0;
    let mut last_done: Option<NaiveDate> = None;

    for (date, done) in records {
        if !done {
            run = 0;
            last_done = None;
            continue;
        }

        run = match last_done {
            Some(previous) if date - previous == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        last_done = Some(date);
    }

    longest
}
