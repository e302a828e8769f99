/// Command for listing current and longest streaks

use chrono::NaiveDate;
use serde::Serialize;
use crate::analytics::{all_streaks, HabitStreak};
use crate::calendar::NO_HABITS_MESSAGE;
use crate::domain::StreakClass;
use crate::storage::{HabitStorage, StorageError};

/// Response from checking habit status
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub habits: Vec<HabitStreak>,
    pub message: String,
}

fn class_label(class: StreakClass) -> &'static str {
    match class {
        StreakClass::Matched => "at best",
        StreakClass::Behind => "behind best",
        StreakClass::None => "no streak",
    }
}

/// Streak summary for every habit as of `today`
pub fn habit_status<S: HabitStorage>(
    storage: &S,
    today: NaiveDate,
) -> Result<StatusResponse, StorageError> {
    let habits = all_streaks(storage, today)?;

    let message = if habits.is_empty() {
        NO_HABITS_MESSAGE.to_string()
    } else {
        habits
            .iter()
            .map(|h| {
                format!(
                    "{:<3} {:<16} current: {:>3} | longest: {:>3} | {}",
                    h.habit.id.to_string(),
                    h.habit.name,
                    h.streak.current,
                    h.streak.longest,
                    class_label(h.class)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(StatusResponse { habits, message })
}
