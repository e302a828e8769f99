/// Storage layer for persisting habit data
///
/// This module handles all database operations using SQLite. It provides
/// a clean interface for storing and retrieving habits and their daily
/// completion records.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;
use crate::domain::{CompletionRecord, CompletionState, DateWindow, DomainError, Habit, HabitId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit with ID {habit_id} not found!")]
    HabitNotFound { habit_id: HabitId },

    #[error("Habit '{name}' already exists!")]
    DuplicateHabit { name: String },

    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for habits
///
/// The streak engine and calendar only use the read side of this trait;
/// the command layer is the only writer.
pub trait HabitStorage {
    /// Create a new habit and return it with its assigned id
    fn create_habit(&self, name: &str) -> Result<Habit, StorageError>;

    /// Get a habit by ID
    fn get_habit(&self, habit_id: HabitId) -> Result<Habit, StorageError>;

    /// Delete a habit and its tracking history, returning the removed habit
    fn delete_habit(&self, habit_id: HabitId) -> Result<Habit, StorageError>;

    /// List all habits ordered by id ascending
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Mark a habit done or not done on a day, replacing any earlier mark
    fn set_completion(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
        done: bool,
    ) -> Result<(), StorageError>;

    /// Get what is recorded for a habit on one day
    fn get_completion(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
    ) -> Result<CompletionState, StorageError>;

    /// Get the records for every day of a window; absent days are NoData
    fn get_completions(
        &self,
        habit_id: HabitId,
        window: &DateWindow,
    ) -> Result<HashMap<NaiveDate, bool>, StorageError>;

    /// Get every record ever stored for a habit, oldest first
    fn get_full_history(&self, habit_id: HabitId) -> Result<Vec<CompletionRecord>, StorageError>;
}
