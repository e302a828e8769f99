/// Integration tests against an on-disk database
use chrono::{Duration, NaiveDate};
use habit_calendar::commands::{add_habits, parse_short_command, remove_habits, track_habit};
use habit_calendar::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 16).unwrap()
    }

    #[test]
    fn test_database_persistence() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let tracker = HabitTracker::open(&db_path).expect("Failed to open first tracker");
        add_habits(tracker.storage(), "Exercise,Reading").unwrap();
        let params = parse_short_command(&["+1"]).unwrap();
        track_habit(tracker.storage(), params, today()).unwrap();
        tracker.close().expect("Failed to close tracker");

        let tracker = HabitTracker::open(&db_path).expect("Failed to reopen tracker");
        let habits = tracker.storage().list_habits().unwrap();
        assert_eq!(habits.len(), 2);
        assert_eq!(
            tracker.compute_streaks_as_of(HabitId(1), today()).unwrap(),
            StreakResult { current: 1, longest: 1 }
        );
    }

    #[test]
    fn test_calendar_scenarios() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let tracker = HabitTracker::open(temp_file.path()).unwrap();
        add_habits(tracker.storage(), "Habit with equal streaks,Habit with broken streak,Never").unwrap();

        let storage = tracker.storage();
        for offset in 0..3 {
            storage.set_completion(HabitId(1), today() - Duration::days(offset), true).unwrap();
        }
        for offset in 3..6 {
            storage.set_completion(HabitId(2), today() - Duration::days(offset), true).unwrap();
        }
        storage.set_completion(HabitId(2), today(), true).unwrap();

        let calendar = tracker.calendar_as_of(today()).unwrap();
        let summary: Vec<(u32, u32, StreakClass)> = calendar
            .rows
            .iter()
            .map(|row| (row.streak.current, row.streak.longest, row.class))
            .collect();
        assert_eq!(
            summary,
            vec![
                (3, 3, StreakClass::Matched),
                (1, 3, StreakClass::Behind),
                (0, 0, StreakClass::None),
            ]
        );

        let text = calendar.render(OutputFormat::Plain).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("1   Habit with equal"));
        assert_eq!(lines[2].matches('D').count(), 3);
        assert_eq!(lines[3].matches('D').count(), 4);
        assert_eq!(lines[4].matches('D').count(), 0);
    }

    #[test]
    fn test_remove_then_calendar_is_empty() {
        let tracker = HabitTracker::in_memory().unwrap();
        add_habits(tracker.storage(), "Exercise").unwrap();
        remove_habits(tracker.storage(), "1").unwrap();

        let text = tracker.calendar_as_of(today()).unwrap().render(OutputFormat::Plain).unwrap();
        assert_eq!(text.trim_end(), NO_HABITS_MESSAGE);
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_storage_interface() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path()).expect("Failed to create storage");

        // SqliteStorage is usable through the trait object
        let storage: &dyn HabitStorage = &storage;
        assert!(storage.list_habits().unwrap().is_empty());
    }
}
