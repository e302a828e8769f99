/// Habit entity and related functionality
///
/// This module defines the Habit struct that represents something the user
/// wants to track, along with name validation.

use serde::{Deserialize, Serialize};
use crate::domain::{HabitId, DomainError};

/// Longest habit name accepted on creation
pub const MAX_NAME_LEN: usize = 100;

/// A habit the user tracks day by day
///
/// Ids are assigned by the storage layer, so a Habit value always refers to
/// a row that exists (or existed) in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique, stable identifier
    pub id: HabitId,
    /// Display name (e.g., "Drink Water", "Exercise")
    pub name: String,
}

impl Habit {
    /// Create a habit from existing data (used when loading from database)
    pub fn from_existing(id: HabitId, name: String) -> Self {
        Self { id, name }
    }

    /// Validate and normalize a habit name before it is stored
    ///
    /// Returns the trimmed name on success.
    pub fn normalize_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::InvalidHabitName(
                format!("Habit name cannot be longer than {} characters", MAX_NAME_LEN)
            ));
        }

        Ok(trimmed.to_string())
    }
}
