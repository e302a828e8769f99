/// Command for marking a habit done or not done
///
/// Tracks for today by default, or for a day of the month resolved inside
/// the current window (`+3 on 14`).

use chrono::NaiveDate;
use serde::Serialize;
use crate::domain::{DateWindow, DomainError, HabitId, DATE_FORMAT};
use crate::storage::{HabitStorage, StorageError};

/// Parameters for tracking a habit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackParams {
    pub habit_id: HabitId,
    pub done: bool,
    /// Day of the month inside the window; None means today
    pub day: Option<String>,
}

/// Response from tracking a habit
#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub habit_id: HabitId,
    pub date: NaiveDate,
    pub done: bool,
    pub message: String,
}

/// Whether a raw argument is a short track command like `+2` or `-2`
pub fn is_short_command(arg: &str) -> bool {
    let mut chars = arg.chars();
    match chars.next() {
        Some('+') => true,
        Some('-') => chars.next().map_or(false, |c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Parse `+<id> [on <day>]` or `-<id> [on <day>]`
pub fn parse_short_command<S: AsRef<str>>(args: &[S]) -> Result<TrackParams, DomainError> {
    let usage = || DomainError::InvalidCommand(
        "Use +<id> [on <day>] or -<id> [on <day>]".to_string()
    );

    let (command, rest) = args.split_first().ok_or_else(usage)?;
    let command = command.as_ref();

    let done = match command.chars().next() {
        Some('+') => true,
        Some('-') => false,
        _ => return Err(usage()),
    };
    let habit_id = command[1..].parse::<HabitId>()?;

    let day = match rest {
        [] => None,
        [on, day] if on.as_ref().eq_ignore_ascii_case("on") => Some(day.as_ref().to_string()),
        _ => return Err(usage()),
    };

    Ok(TrackParams { habit_id, done, day })
}

/// Resolve the date a command applies to: today, or a day in today's window
pub fn resolve_date(day: Option<&str>, today: NaiveDate) -> Result<NaiveDate, DomainError> {
    match day {
        Some(day) => DateWindow::standard(today).parse_day(day),
        None => Ok(today),
    }
}

/// Record a done/not-done mark for a habit
pub fn track_habit<S: HabitStorage>(
    storage: &S,
    params: TrackParams,
    today: NaiveDate,
) -> Result<TrackResponse, StorageError> {
    let habit = storage.get_habit(params.habit_id)?;
    let date = resolve_date(params.day.as_deref(), today)?;

    storage.set_completion(habit.id, date, params.done)?;

    let status = if params.done { "done" } else { "not done" };
    Ok(TrackResponse {
        habit_id: habit.id,
        date,
        done: params.done,
        message: format!(
            "Habit '{}' (ID: {}) tracked as {} for {}!",
            habit.name,
            habit.id,
            status,
            date.format(DATE_FORMAT)
        ),
    })
}
