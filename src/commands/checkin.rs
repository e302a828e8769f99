/// Interactive check-in: ask about every habit in turn
///
/// One blocking line read per habit, in id order. Input and output are
/// passed in so the prompt loop can run against buffers in tests.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use serde::Serialize;
use crate::calendar::NO_HABITS_MESSAGE;
use crate::commands::resolve_date;
use crate::domain::DATE_FORMAT;
use crate::storage::HabitStorage;
use crate::TrackerError;

/// Parameters for a check-in session
#[derive(Debug, Clone, Default)]
pub struct CheckinParams {
    /// Day of the month inside the window; None means today
    pub day: Option<String>,
}

/// Response from a check-in session
#[derive(Debug, Default, Serialize)]
pub struct CheckinResponse {
    pub date: Option<NaiveDate>,
    pub done: u32,
    pub not_done: u32,
    pub skipped: u32,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Answer {
    Yes,
    No,
    Skip,
}

impl Answer {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(Answer::Yes),
            "n" | "no" => Some(Answer::No),
            "s" | "skip" => Some(Answer::Skip),
            _ => None,
        }
    }
}

/// Prompt for every habit and record the answers
///
/// `y` marks done, `n` marks not done, `s` leaves the day untouched.
/// Unrecognized answers repeat the prompt. If input ends early, the
/// remaining habits are skipped.
pub fn checkin<S, R, W>(
    storage: &S,
    params: CheckinParams,
    today: NaiveDate,
    mut input: R,
    mut output: W,
) -> Result<CheckinResponse, TrackerError>
where
    S: HabitStorage,
    R: BufRead,
    W: Write,
{
    let habits = storage.list_habits()?;
    if habits.is_empty() {
        return Ok(CheckinResponse {
            message: NO_HABITS_MESSAGE.to_string(),
            ..Default::default()
        });
    }

    let date = resolve_date(params.day.as_deref(), today)?;
    let mut response = CheckinResponse {
        date: Some(date),
        ..Default::default()
    };
    let mut line = String::new();
    let mut input_closed = false;

    for habit in &habits {
        let answer = loop {
            if input_closed {
                break Answer::Skip;
            }

            write!(
                output,
                "Did you complete '{}' on {}? [y/n/s]: ",
                habit.name,
                date.format(DATE_FORMAT)
            )?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                input_closed = true;
                continue;
            }

            match Answer::parse(&line) {
                Some(answer) => break answer,
                None => writeln!(output, "Please answer y, n or s.")?,
            }
        };

        match answer {
            Answer::Yes => {
                storage.set_completion(habit.id, date, true)?;
                response.done += 1;
            }
            Answer::No => {
                storage.set_completion(habit.id, date, false)?;
                response.not_done += 1;
            }
            Answer::Skip => response.skipped += 1,
        }
    }

    tracing::info!(
        "Check-in for {}: {} done, {} not done, {} skipped",
        date,
        response.done,
        response.not_done,
        response.skipped
    );
    response.message = format!(
        "Check-in complete for {}: {} done, {} not done, {} skipped.",
        date.format(DATE_FORMAT),
        response.done,
        response.not_done,
        response.skipped
    );

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CompletionState;
    use crate::storage::SqliteStorage;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 5).unwrap()
    }

    fn storage_with_habits() -> SqliteStorage {
        let storage = SqliteStorage::in_memory().unwrap();
        for name in ["Exercise", "Reading", "Meditation"] {
            storage.create_habit(name).unwrap();
        }
        storage
    }

    #[test]
    fn test_checkin_records_answers() {
        let storage = storage_with_habits();
        let mut output = Vec::new();

        let response = checkin(
            &storage,
            CheckinParams::default(),
            today(),
            "y\nn\ns\n".as_bytes(),
            &mut output,
        )
        .unwrap();

        assert_eq!((response.done, response.not_done, response.skipped), (1, 1, 1));
        let habits = storage.list_habits().unwrap();
        assert_eq!(storage.get_completion(habits[0].id, today()).unwrap(), CompletionState::Done);
        assert_eq!(storage.get_completion(habits[1].id, today()).unwrap(), CompletionState::NotDone);
        assert_eq!(storage.get_completion(habits[2].id, today()).unwrap(), CompletionState::NoData);

        let prompts = String::from_utf8(output).unwrap();
        assert!(prompts.starts_with("Did you complete 'Exercise' on 2024-08-05? [y/n/s]: "));
    }

    #[test]
    fn test_checkin_reprompts_on_invalid_answer() {
        let storage = storage_with_habits();
        let mut output = Vec::new();

        let response = checkin(
            &storage,
            CheckinParams::default(),
            today(),
            "maybe\nY\nno\nskip\n".as_bytes(),
            &mut output,
        )
        .unwrap();

        assert_eq!((response.done, response.not_done, response.skipped), (1, 1, 1));
        let prompts = String::from_utf8(output).unwrap();
        assert_eq!(prompts.matches("Please answer y, n or s.").count(), 1);
        assert_eq!(prompts.matches("'Exercise'").count(), 2);
    }

    #[test]
    fn test_checkin_stops_at_end_of_input() {
        let storage = storage_with_habits();

        let response = checkin(
            &storage,
            CheckinParams::default(),
            today(),
            "y\n".as_bytes(),
            Vec::new(),
        )
        .unwrap();

        assert_eq!((response.done, response.not_done, response.skipped), (1, 0, 2));
    }

    #[test]
    fn test_checkin_for_past_day() {
        let storage = storage_with_habits();

        let response = checkin(
            &storage,
            CheckinParams { day: Some("1".to_string()) },
            today(),
            "y\ny\ny\n".as_bytes(),
            Vec::new(),
        )
        .unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert_eq!(response.date, Some(day));
        for habit in storage.list_habits().unwrap() {
            assert_eq!(storage.get_completion(habit.id, day).unwrap(), CompletionState::Done);
        }
    }

    #[test]
    fn test_checkin_without_habits() {
        let storage = SqliteStorage::in_memory().unwrap();
        let response = checkin(
            &storage,
            CheckinParams::default(),
            today(),
            "".as_bytes(),
            Vec::new(),
        )
        .unwrap();

        assert_eq!(response.message, NO_HABITS_MESSAGE);
        assert_eq!(response.date, None);
    }
}
