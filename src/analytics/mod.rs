/// Streak engine over stored habit history
///
/// This module connects the pure streak calculations in the domain layer to
/// a storage backend: it loads a habit's history and turns it into a
/// `StreakResult`.

use chrono::NaiveDate;
use crate::domain::{Habit, HabitId, StreakClass, StreakResult};
use crate::storage::{HabitStorage, StorageError};

/// Streak figures for one habit, ready for display
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HabitStreak {
    pub habit: Habit,
    pub streak: StreakResult,
    pub class: StreakClass,
}

/// Compute current and longest streak for a habit as of `today`
///
/// Both numbers come from one read of the full history, so the current
/// streak can never exceed the longest. A habit with no records (or an id
/// that doesn't exist) yields zero for both.
pub fn compute_streaks<S: HabitStorage>(
    storage: &S,
    habit_id: HabitId,
    today: NaiveDate,
) -> Result<StreakResult, StorageError> {
    let history = storage.get_full_history(habit_id)?;
    if history.is_empty() {
        tracing::debug!("No tracking history for habit {}", habit_id);
    }

    Ok(StreakResult::from_history(&history, today))
}

/// Compute streaks for every habit, in id order
pub fn all_streaks<S: HabitStorage>(
    storage: &S,
    today: NaiveDate,
) -> Result<Vec<HabitStreak>, StorageError> {
    storage
        .list_habits()?
        .into_iter()
        .map(|habit| {
            let streak = compute_streaks(storage, habit.id, today)?;
            Ok(HabitStreak {
                class: streak.class(),
                habit,
                streak,
            })
        })
        .collect()
}
