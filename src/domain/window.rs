/// Rolling window of recent calendar days
///
/// The window is rebuilt from the local date on every query. Nothing caches
/// it, so it moves forward by one day at each midnight between invocations.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;
use crate::domain::DomainError;

/// Number of days shown in the calendar and searched by day-of-month lookups
pub const WINDOW_DAYS: i64 = 30;

/// An ordered run of consecutive days, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    dates: Vec<NaiveDate>,
}

impl DateWindow {
    /// The default display window ending today
    pub fn current() -> Self {
        Self::standard(today())
    }

    /// A `WINDOW_DAYS`-long window ending at `anchor`
    pub fn standard(anchor: NaiveDate) -> Self {
        Self::ending_at(anchor, WINDOW_DAYS)
    }

    /// The last `days` days ending at `anchor` (inclusive)
    pub fn last_n_days(days: i64, anchor: NaiveDate) -> Result<Self, DomainError> {
        if days < 0 {
            return Err(DomainError::InvalidWindow(days));
        }
        Ok(Self::ending_at(anchor, days))
    }

    fn ending_at(anchor: NaiveDate, days: i64) -> Self {
        Self {
            dates: (0..days)
                .rev()
                .map(|offset| anchor - Duration::days(offset))
                .collect(),
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Oldest day in the window
    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Newest day in the window (the anchor)
    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => date >= first && date <= last,
            _ => false,
        }
    }

    /// Find the date in this window whose day of month is `day`
    ///
    /// Scans oldest to newest and returns the first match, so a day number
    /// that occurs twice in the window resolves to the older date.
    pub fn resolve_day(&self, day: u32) -> Result<NaiveDate, DomainError> {
        self.dates
            .iter()
            .find(|date| date.day() == day)
            .copied()
            .ok_or_else(|| DomainError::InvalidDate(
                format!("Day {} is not within the last {} days.", day, self.dates.len())
            ))
    }

    /// Parse a user-supplied day number and resolve it within the window
    pub fn parse_day(&self, input: &str) -> Result<NaiveDate, DomainError> {
        let day = input.trim().parse::<u32>().map_err(|_| {
            DomainError::InvalidDate(format!("Invalid day '{}'. Please provide a number.", input))
        })?;
        self.resolve_day(day)
    }
}

/// The process-local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
