/// Core types used throughout the domain layer
///
/// This module defines the habit identifier and the ternary completion state
/// that every calendar cell and streak scan is built from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// This wraps the integer row id assigned by the database so a habit id can't
/// be confused with a day number or a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub i64);

impl HabitId {
    /// Get the raw integer value (useful for database queries)
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HabitId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(HabitId)
            .map_err(|_| DomainError::InvalidHabitId(s.to_string()))
    }
}

/// What is known about a habit on a single day
///
/// `NoData` means no record was ever stored for that day. For streaks it
/// breaks a run exactly like `NotDone`; the calendar draws both the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionState {
    Done,
    NotDone,
    NoData,
}

impl CompletionState {
    /// Build a state from an optional stored flag
    pub fn from_record(done: Option<bool>) -> Self {
        match done {
            Some(true) => CompletionState::Done,
            Some(false) => CompletionState::NotDone,
            None => CompletionState::NoData,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, CompletionState::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_habit_id() {
        assert_eq!("42".parse::<HabitId>().unwrap(), HabitId(42));
        assert_eq!(" 7 ".parse::<HabitId>().unwrap(), HabitId(7));
        assert!("abc".parse::<HabitId>().is_err());
        assert!("".parse::<HabitId>().is_err());
    }

    #[test]
    fn test_completion_state_from_record() {
        assert_eq!(CompletionState::from_record(Some(true)), CompletionState::Done);
        assert_eq!(CompletionState::from_record(Some(false)), CompletionState::NotDone);
        assert_eq!(CompletionState::from_record(None), CompletionState::NoData);
        assert!(!CompletionState::NoData.is_done());
    }
}
