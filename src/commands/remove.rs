/// Command for removing habits and their tracking history

use serde::Serialize;
use crate::domain::{Habit, HabitId};
use crate::storage::{HabitStorage, StorageError};

/// Response from removing habits
#[derive(Debug, Serialize)]
pub struct RemoveHabitsResponse {
    pub removed: Vec<Habit>,
    pub missing: Vec<HabitId>,
    pub message: String,
}

impl RemoveHabitsResponse {
    pub fn success(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Parse a comma-separated list of habit ids
///
/// Any entry that isn't a number rejects the whole list.
pub fn parse_habit_ids(ids: &str) -> Result<Vec<HabitId>, StorageError> {
    ids.split(',')
        .map(|id| id.parse::<HabitId>().map_err(StorageError::from))
        .collect()
}

/// Remove every habit listed in `ids` (comma-separated)
pub fn remove_habits<S: HabitStorage>(
    storage: &S,
    ids: &str,
) -> Result<RemoveHabitsResponse, StorageError> {
    let habit_ids = parse_habit_ids(ids)?;
    let mut removed = Vec::new();
    let mut missing = Vec::new();
    let mut lines = Vec::new();

    for habit_id in &habit_ids {
        match storage.delete_habit(*habit_id) {
            Ok(habit) => {
                lines.push(format!(
                    "Habit '{}' (ID: {}) and its tracking history removed successfully!",
                    habit.name, habit.id
                ));
                removed.push(habit);
            }
            Err(e @ StorageError::HabitNotFound { .. }) => {
                lines.push(format!("Error: {}", e));
                missing.push(*habit_id);
            }
            Err(e) => return Err(e),
        }
    }

    let total = habit_ids.len();
    if missing.is_empty() {
        lines.push(format!("All {} habits removed successfully!", total));
    } else {
        lines.push(format!("Removed {} out of {} habits.", removed.len(), total));
    }

    Ok(RemoveHabitsResponse {
        removed,
        missing,
        message: lines.join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;

    #[test]
    fn test_remove_habits() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.create_habit("Exercise").unwrap();
        storage.create_habit("Reading").unwrap();

        let response = remove_habits(&storage, "1, 5").unwrap();
        assert!(!response.success());
        assert_eq!(response.removed[0].name, "Exercise");
        assert_eq!(response.missing, vec![HabitId(5)]);
        assert!(response.message.contains("Error: Habit with ID 5 not found!"));
        assert!(response.message.ends_with("Removed 1 out of 2 habits."));

        let remaining = storage.list_habits().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Reading");
    }

    #[test]
    fn test_invalid_id_list_removes_nothing() {
        let storage = SqliteStorage::in_memory().unwrap();
        storage.create_habit("Exercise").unwrap();

        assert!(matches!(
            remove_habits(&storage, "1,two"),
            Err(StorageError::Validation(_))
        ));
        assert_eq!(storage.list_habits().unwrap().len(), 1);
    }
}
