//! Toggle semantics through the tracker's public operations
use chrono::NaiveDate;
use dailypod::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tracker(today: NaiveDate) -> (DailyPodServer, HabitId) {
    let storage = SqliteStorage::open_in_memory().expect("Failed to open storage");
    let habit = Habit::new(
        "Stretch".to_string(),
        None,
        DEFAULT_COLOR.to_string(),
        DEFAULT_ICON.to_string(),
        TargetFrequency::Daily,
        1,
    )
    .unwrap();
    storage.create_habit(&habit).unwrap();

    (DailyPodServer::with_storage(storage).with_today(today), habit.id)
}

#[test]
fn test_toggle_three_times() {
    let today = date(2024, 7, 4);
    let (server, habit_id) = tracker(today);

    let first = server.toggle(&habit_id, None).unwrap();
    assert!(first.completed);
    assert_eq!(first.count, 1);
    assert_eq!(first.date, today);

    let second = server.toggle(&habit_id, None).unwrap();
    assert!(!second.completed);
    assert_eq!(second.count, 0);

    let third = server.toggle(&habit_id, None).unwrap();
    assert!(third.completed);
    assert_eq!(third.count, 1);

    let history = server.storage().get_completion_history(&habit_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, first.id);
}

#[test]
fn test_toggle_specific_day_leaves_today_alone() {
    let today = date(2024, 7, 4);
    let (server, habit_id) = tracker(today);

    server.toggle(&habit_id, Some(date(2024, 7, 3))).unwrap();

    assert!(server.storage().get_record(&habit_id, today).unwrap().is_none());
    assert!(server.storage().get_record(&habit_id, date(2024, 7, 3)).unwrap().unwrap().completed);
}

#[test]
fn test_statistics_follow_toggles() {
    let today = date(2024, 7, 4);
    let (server, habit_id) = tracker(today);

    server.toggle(&habit_id, Some(date(2024, 7, 2))).unwrap();
    server.toggle(&habit_id, Some(date(2024, 7, 3))).unwrap();
    server.toggle(&habit_id, None).unwrap();

    let stats = server.compute_statistics(&habit_id).unwrap();
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.longest_streak, 3);
    assert_eq!(stats.total_completions, 3);

    // Undo today: the streak ending today is gone, the closed run remains
    server.toggle(&habit_id, None).unwrap();
    let stats = server.compute_statistics(&habit_id).unwrap();
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.longest_streak, 2);
    assert_eq!(stats.total_completions, 2);
}

#[test]
fn test_statistics_for_unknown_habit_are_zero() {
    let (server, _) = tracker(date(2024, 7, 4));

    let stats = server.compute_statistics(&HabitId::new()).unwrap();
    assert_eq!(stats, Statistics::default());

    let stats = compute_statistics(server.storage(), &HabitId::new(), date(2024, 7, 4)).unwrap();
    assert_eq!(stats, Statistics::default());
}

#[test]
fn test_tracker_statistics_match_store_query() {
    let today = date(2024, 7, 4);
    let (server, habit_id) = tracker(today);

    for day in [date(2024, 6, 20), date(2024, 7, 3), today] {
        server.toggle(&habit_id, Some(day)).unwrap();
    }

    let direct = compute_statistics(server.storage(), &habit_id, today).unwrap();
    assert_eq!(server.compute_statistics(&habit_id).unwrap(), direct);
    assert_eq!(direct.current_streak, 2);
    assert_eq!(direct.total_completions, 3);
}
