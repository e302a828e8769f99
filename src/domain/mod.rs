/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, CompletionRecord), the
/// rolling date window and the streak engine. Everything here is pure: no
/// module in the domain layer touches the database.

pub mod habit;
pub mod entry;
pub mod streak;
pub mod types;
pub mod window;

// Re-export public types for easy access
pub use habit::*;
pub use entry::*;
pub use streak::*;
pub use types::*;
pub use window::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid habit ID '{0}'. Please provide a number.")]
    InvalidHabitId(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid window length: {0}")]
    InvalidWindow(i64),

    #[error("Invalid command format. {0}")]
    InvalidCommand(String),
}
