/// CompletionRecord entity for tracking a habit on a given day
///
/// A record is the stored fact "habit X was (or was not) done on day D".
/// Days without a record are `NoData`; they are never materialized here.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::HabitId;

/// Date format used for every stored and displayed calendar day
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored done/not-done mark for one habit on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Which habit this record is for
    pub habit_id: HabitId,
    /// The calendar day the mark applies to
    pub date: NaiveDate,
    /// Whether the habit was done that day
    pub done: bool,
}

impl CompletionRecord {
    pub fn new(habit_id: HabitId, date: NaiveDate, done: bool) -> Self {
        Self { habit_id, date, done }
    }
}

/// Parse a stored `YYYY-MM-DD` day
///
/// Returns None for anything that doesn't parse; callers treat that as a
/// missing record.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stored_date() {
        assert_eq!(
            parse_stored_date("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(parse_stored_date("2023-02-29"), None);
        assert_eq!(parse_stored_date("29/02/2024"), None);
        assert_eq!(parse_stored_date(""), None);
    }
}
