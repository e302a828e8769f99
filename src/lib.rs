/// Public library interface for the habit calendar
///
/// This module exports the tracker handle and the public types that the
/// command-line binary and tests build on.

use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod analytics;
mod calendar;
pub mod commands;

// Re-export public modules and types
pub use domain::*;
pub use storage::{HabitStorage, SqliteStorage, StorageError};
pub use analytics::{all_streaks, compute_streaks, HabitStreak};
pub use calendar::{Calendar, CalendarRow, OutputFormat, NO_HABITS_MESSAGE};

/// Errors that can occur while running a tracker operation
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("{0}")]
    Database(#[from] storage::StorageError),

    #[error("{0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Handle to an open habit database
///
/// The caller opens the tracker once, runs any number of queries or
/// commands against it, and then closes it.
pub struct HabitTracker {
    storage: SqliteStorage,
}

impl HabitTracker {
    /// Open the tracker on the database at `db_path`
    ///
    /// This will initialize the SQLite schema if the file is new.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, TrackerError> {
        tracing::info!("Opening habit database: {:?}", db_path.as_ref());
        let storage = SqliteStorage::new(db_path)?;
        Ok(Self { storage })
    }

    /// Open a tracker on a throwaway in-memory database
    pub fn in_memory() -> Result<Self, TrackerError> {
        Ok(Self {
            storage: SqliteStorage::in_memory()?,
        })
    }

    /// Get a reference to the storage layer
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Current and longest streak for a habit as of today
    pub fn compute_streaks(&self, habit_id: HabitId) -> Result<StreakResult, TrackerError> {
        self.compute_streaks_as_of(habit_id, today())
    }

    pub fn compute_streaks_as_of(
        &self,
        habit_id: HabitId,
        today: NaiveDate,
    ) -> Result<StreakResult, TrackerError> {
        Ok(analytics::compute_streaks(&self.storage, habit_id, today)?)
    }

    /// Build the calendar for the window ending today
    pub fn calendar(&self) -> Result<Calendar, TrackerError> {
        self.calendar_as_of(today())
    }

    pub fn calendar_as_of(&self, today: NaiveDate) -> Result<Calendar, TrackerError> {
        let window = DateWindow::standard(today);
        Ok(Calendar::build(&self.storage, &window, today)?)
    }

    /// Render the calendar for the window ending today
    pub fn render_calendar(&self, format: OutputFormat) -> Result<String, TrackerError> {
        Ok(self.calendar()?.render(format)?)
    }

    /// Release the database connection
    pub fn close(self) -> Result<(), TrackerError> {
        tracing::debug!("Closing habit database");
        Ok(self.storage.close()?)
    }
}
