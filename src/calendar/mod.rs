/// Calendar grid of recent habit activity
///
/// A `Calendar` is built once per query from the current window and the
/// storage, then rendered by one of the output backends. Rows carry their
/// streak classification as data so no backend needs to recompute it.

use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;

use crate::analytics::compute_streaks;
use crate::domain::{CompletionState, DateWindow, HabitId, StreakClass, StreakResult};
use crate::storage::{HabitStorage, StorageError};

/// Shown instead of a grid when there is nothing to draw
pub const NO_HABITS_MESSAGE: &str = "No habits found. Add some habits to start tracking!";

const ID_WIDTH: usize = 3;
const NAME_WIDTH: usize = 16;
const CELL_WIDTH: usize = 3;

const DONE_MARK: &str = "D";
const EMPTY_MARK: &str = "-";

/// How a calendar should be turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Fixed-width grid without escape codes
    Plain,
    /// Fixed-width grid with done cells coloured by streak class
    Ansi,
    /// Pretty-printed JSON of the calendar structure
    Json,
}

/// One habit's line in the calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarRow {
    pub habit_id: HabitId,
    pub name: String,
    /// One state per window day, oldest first
    pub cells: Vec<CompletionState>,
    pub streak: StreakResult,
    pub class: StreakClass,
}

/// The full calendar for a window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calendar {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<CalendarRow>,
}

impl Calendar {
    /// Build the calendar for every stored habit over `window`
    ///
    /// Cells come from a lookup limited to the window dates; streaks come
    /// from the habit's full history as of `today`.
    pub fn build<S: HabitStorage>(
        storage: &S,
        window: &DateWindow,
        today: NaiveDate,
    ) -> Result<Self, StorageError> {
        let habits = storage.list_habits()?;
        let mut rows = Vec::with_capacity(habits.len());

        for habit in habits {
            let completions = storage.get_completions(habit.id, window)?;
            let cells = window
                .dates()
                .iter()
                .map(|date| CompletionState::from_record(completions.get(date).copied()))
                .collect();
            let streak = compute_streaks(storage, habit.id, today)?;

            rows.push(CalendarRow {
                habit_id: habit.id,
                name: habit.name,
                cells,
                class: streak.class(),
                streak,
            });
        }

        tracing::debug!("Built calendar with {} rows over {} days", rows.len(), window.len());
        Ok(Self {
            dates: window.dates().to_vec(),
            rows,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render with the chosen backend
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Plain => Ok(self.render_text(false)),
            OutputFormat::Ansi => Ok(self.render_text(true)),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    fn render_text(&self, color: bool) -> String {
        if self.is_empty() {
            return format!("{}\n", NO_HABITS_MESSAGE);
        }

        let mut out = format!("{:<ID_WIDTH$} {:<NAME_WIDTH$}", "ID", "Habit");
        for date in &self.dates {
            out.push_str(&format!("{:>CELL_WIDTH$}", date.format("%d").to_string()));
        }
        out.push('\n');
        out.push_str(&"-".repeat(ID_WIDTH + 1 + NAME_WIDTH + self.dates.len() * CELL_WIDTH));
        out.push('\n');

        let padding = " ".repeat(CELL_WIDTH - 1);
        for row in &self.rows {
            let name: String = row.name.chars().take(NAME_WIDTH).collect();
            out.push_str(&format!("{:<ID_WIDTH$} {:<NAME_WIDTH$}", row.habit_id.to_string(), name));
            for cell in &row.cells {
                out.push_str(&padding);
                out.push_str(&cell_mark(*cell, row.class, color));
            }
            out.push('\n');
        }

        out
    }
}

/// The one-character mark for a cell, styled for its row's streak class
fn cell_mark(state: CompletionState, class: StreakClass, color: bool) -> String {
    match state {
        CompletionState::Done if color => match class {
            StreakClass::Matched => DONE_MARK.green().to_string(),
            StreakClass::Behind => DONE_MARK.red().to_string(),
            StreakClass::None => DONE_MARK.to_string(),
        },
        CompletionState::Done => DONE_MARK.to_string(),
        CompletionState::NotDone | CompletionState::NoData => EMPTY_MARK.to_string(),
    }
}
