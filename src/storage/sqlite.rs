/// SQLite implementation of the habit storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving habits and tracking records.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::domain::{
    parse_stored_date, CompletionRecord, CompletionState, DateWindow, Habit, HabitId,
};
use crate::storage::{migrations, HabitStorage, StorageError};

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the HabitStorage trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database file and bring its schema up to date
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::with_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(storage)
    }

    /// Open a private in-memory database (used by tests)
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    /// Close the connection, reporting any error SQLite raises on shutdown
    pub fn close(self) -> Result<(), StorageError> {
        self.conn.close().map_err(|(_, e)| StorageError::Query(e))
    }

    /// Store a raw date string as-is (used by tests to simulate bad rows)
    #[cfg(test)]
    pub(crate) fn insert_raw_record(
        &self,
        habit_id: HabitId,
        date: &str,
        done: bool,
    ) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO tracking (habit_id, date, done) VALUES (?1, ?2, ?3)",
            params![habit_id.value(), date, done],
        )?;
        Ok(())
    }

    /// Convert a stored (date, done) row, dropping dates that don't parse
    fn decode_record(habit_id: HabitId, raw_date: String, done: bool) -> Option<CompletionRecord> {
        match parse_stored_date(&raw_date) {
            Some(date) => Some(CompletionRecord::new(habit_id, date, done)),
            None => {
                tracing::warn!(
                    "Ignoring tracking row with malformed date '{}' for habit {}",
                    raw_date,
                    habit_id
                );
                None
            }
        }
    }
}

impl HabitStorage for SqliteStorage {
    fn create_habit(&self, name: &str) -> Result<Habit, StorageError> {
        let name = Habit::normalize_name(name)?;

        let result = self.conn.execute(
            "INSERT INTO habits (name) VALUES (?1)",
            params![name],
        );

        match result {
            Ok(_) => {
                let habit = Habit::from_existing(HabitId(self.conn.last_insert_rowid()), name);
                tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
                Ok(habit)
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::DuplicateHabit { name })
            }
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn get_habit(&self, habit_id: HabitId) -> Result<Habit, StorageError> {
        let result = self
            .conn
            .query_row(
                "SELECT id, name FROM habits WHERE id = ?1",
                params![habit_id.value()],
                |row| Ok(Habit::from_existing(HabitId(row.get(0)?), row.get(1)?)),
            )
            .optional()?;

        result.ok_or(StorageError::HabitNotFound { habit_id })
    }

    fn delete_habit(&self, habit_id: HabitId) -> Result<Habit, StorageError> {
        let habit = self.get_habit(habit_id)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM tracking WHERE habit_id = ?1",
            params![habit_id.value()],
        )?;
        tx.execute(
            "DELETE FROM habits WHERE id = ?1",
            params![habit_id.value()],
        )?;
        tx.commit()?;

        tracing::debug!("Deleted habit {} and its tracking history", habit_id);
        Ok(habit)
    }

    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM habits ORDER BY id")?;
        let habit_iter = stmt.query_map([], |row| {
            Ok(Habit::from_existing(HabitId(row.get(0)?), row.get(1)?))
        })?;

        let mut habits = Vec::new();
        for habit in habit_iter {
            habits.push(habit?);
        }

        Ok(habits)
    }

    fn set_completion(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
        done: bool,
    ) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO tracking (habit_id, date, done) VALUES (?1, ?2, ?3)",
            params![habit_id.value(), date, done],
        )?;

        tracing::debug!("Tracked habit {} on {} as done={}", habit_id, date, done);
        Ok(())
    }

    fn get_completion(
        &self,
        habit_id: HabitId,
        date: NaiveDate,
    ) -> Result<CompletionState, StorageError> {
        let done: Option<bool> = self
            .conn
            .query_row(
                "SELECT done FROM tracking WHERE habit_id = ?1 AND date = ?2",
                params![habit_id.value(), date],
                |row| row.get(0),
            )
            .optional()?;

        Ok(CompletionState::from_record(done))
    }

    fn get_completions(
        &self,
        habit_id: HabitId,
        window: &DateWindow,
    ) -> Result<HashMap<NaiveDate, bool>, StorageError> {
        let (first, last) = match (window.first(), window.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(HashMap::new()),
        };

        let mut stmt = self.conn.prepare(
            "SELECT date, done FROM tracking
             WHERE habit_id = ?1 AND date BETWEEN ?2 AND ?3",
        )?;
        let rows = stmt.query_map(params![habit_id.value(), first, last], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?))
        })?;

        let mut completions = HashMap::new();
        for row in rows {
            let (raw_date, done) = row?;
            if let Some(record) = Self::decode_record(habit_id, raw_date, done) {
                if window.contains(record.date) {
                    completions.insert(record.date, record.done);
                }
            }
        }

        Ok(completions)
    }

    fn get_full_history(&self, habit_id: HabitId) -> Result<Vec<CompletionRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT date, done FROM tracking WHERE habit_id = ?1 ORDER BY date",
        )?;
        let rows = stmt.query_map(params![habit_id.value()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?))
        })?;

        let mut history = Vec::new();
        for row in rows {
            let (raw_date, done) = row?;
            if let Some(record) = Self::decode_record(habit_id, raw_date, done) {
                history.push(record);
            }
        }

        Ok(history)
    }
}
