/// Unit tests for the public streak and window API
use chrono::{Duration, NaiveDate};
use habit_calendar::*;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_window_ends_at_anchor() {
        let window = DateWindow::last_n_days(WINDOW_DAYS, anchor()).unwrap();
        assert_eq!(window.len(), 30);
        assert_eq!(window.last(), Some(anchor()));
        assert_eq!(window.first(), Some(anchor() - Duration::days(29)));
        assert_eq!(window, DateWindow::standard(anchor()));
    }

    #[test]
    fn test_current_window_ends_today() {
        // Bracket the call so a midnight rollover can't fail the check.
        let before = today();
        let window = DateWindow::current();
        let after = today();

        assert_eq!(window.len(), 30);
        let last = window.last().unwrap();
        assert!(last == before || last == after);
    }

    #[test]
    fn test_run_of_k_days() {
        for k in [1u32, 7, 30, 31, 60] {
            let mut history: Vec<CompletionRecord> = (0..k as i64)
                .map(|offset| CompletionRecord::new(HabitId(1), anchor() - Duration::days(offset), true))
                .collect();
            history.push(CompletionRecord::new(
                HabitId(1),
                anchor() - Duration::days(k as i64),
                false,
            ));

            let streak = StreakResult::from_history(&history, anchor());
            assert_eq!(streak.current, k);
            assert!(streak.current <= streak.longest);
        }
    }

    #[test]
    fn test_never_tracked_habit() {
        let tracker = HabitTracker::in_memory().unwrap();
        let habit = tracker.storage().create_habit("Test Habit").unwrap();

        let streak = tracker.compute_streaks(habit.id).unwrap();
        assert_eq!(streak, StreakResult { current: 0, longest: 0 });
        assert_eq!(streak.class(), StreakClass::None);
    }

    #[test]
    fn test_unknown_habit_does_not_fail() {
        let tracker = HabitTracker::in_memory().unwrap();
        assert_eq!(tracker.compute_streaks(HabitId(77)).unwrap(), StreakResult::default());
    }

    #[test]
    fn test_render_calendar_without_habits() {
        let tracker = HabitTracker::in_memory().unwrap();
        let text = tracker.render_calendar(OutputFormat::Ansi).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), vec![NO_HABITS_MESSAGE]);
    }

    #[test]
    fn test_tracker_close() {
        let tracker = HabitTracker::in_memory().unwrap();
        assert!(tracker.close().is_ok());
    }
}
