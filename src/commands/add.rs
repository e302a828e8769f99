/// Command for adding new habits
///
/// Accepts a comma-separated list so several habits can be added at once.

use serde::Serialize;
use crate::domain::Habit;
use crate::storage::{HabitStorage, StorageError};

/// Response from adding habits
#[derive(Debug, Serialize)]
pub struct AddHabitsResponse {
    pub added: Vec<Habit>,
    /// Names that could not be added, with the reason
    pub failed: Vec<(String, String)>,
    pub message: String,
}

impl AddHabitsResponse {
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Add every habit named in `names` (comma-separated)
///
/// Duplicates and invalid names are reported per habit and don't stop the
/// rest of the list. Database failures are returned as errors.
pub fn add_habits<S: HabitStorage>(
    storage: &S,
    names: &str,
) -> Result<AddHabitsResponse, StorageError> {
    let requested: Vec<&str> = names.split(',').map(str::trim).collect();
    let mut added = Vec::new();
    let mut failed = Vec::new();
    let mut lines = Vec::new();

    for name in &requested {
        match storage.create_habit(name) {
            Ok(habit) => {
                lines.push(format!("Habit '{}' added successfully!", habit.name));
                added.push(habit);
            }
            Err(e @ (StorageError::DuplicateHabit { .. } | StorageError::Validation(_))) => {
                lines.push(format!("Error: {}", e));
                failed.push((name.to_string(), e.to_string()));
            }
            Err(e) => return Err(e),
        }
    }

    let total = requested.len();
    if failed.is_empty() {
        lines.push(format!("All {} habits added successfully!", total));
    } else {
        lines.push(format!("Added {} out of {} habits.", added.len(), total));
    }

    Ok(AddHabitsResponse {
        added,
        failed,
        message: lines.join("\n"),
    })
}
