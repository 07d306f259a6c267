//! Statistics engine behaviour over hand-built histories
use chrono::NaiveDate;
use dailypod::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn done(habit_id: &HabitId, day: NaiveDate) -> CompletionRecord {
    CompletionRecord::new_completed(habit_id.clone(), day)
}

fn undone(habit_id: &HabitId, day: NaiveDate) -> CompletionRecord {
    let mut record = CompletionRecord::new_completed(habit_id.clone(), day);
    record.completed = false;
    record.count = 0;
    record
}

fn compute(history: &[CompletionRecord], today: NaiveDate) -> Statistics {
    StatisticsEngine::new().compute(history, today)
}

#[test]
fn test_empty_history_is_all_zero() {
    let stats = compute(&[], date(2024, 1, 1));
    assert_eq!(stats, Statistics::default());
}

#[test]
fn test_only_uncompleted_records_is_all_zero() {
    let id = HabitId::new();
    let history = vec![undone(&id, date(2024, 1, 1)), undone(&id, date(2024, 1, 2))];

    assert_eq!(compute(&history, date(2024, 1, 2)), Statistics::default());
}

#[test]
fn test_single_completion_today() {
    let id = HabitId::new();
    let today = date(2024, 4, 15);

    let stats = compute(&[done(&id, today)], today);

    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.longest_streak, 1);
    assert_eq!(stats.total_completions, 1);
}

#[test]
fn test_today_and_yesterday() {
    let id = HabitId::new();
    let today = date(2024, 4, 15);

    let stats = compute(&[done(&id, today), done(&id, date(2024, 4, 14))], today);

    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 2);
}

#[test]
fn test_three_consecutive_days() {
    let id = HabitId::new();
    let history = vec![
        done(&id, date(2024, 1, 1)),
        done(&id, date(2024, 1, 2)),
        done(&id, date(2024, 1, 3)),
    ];

    let stats = compute(&history, date(2024, 1, 3));

    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.longest_streak, 3);
    assert_eq!(stats.total_completions, 3);
    assert_eq!(stats.weekly_progress, 42);
    assert_eq!(stats.completion_rate, 10);
}

#[test]
fn test_missed_today_means_no_current_streak() {
    let id = HabitId::new();
    let history = vec![done(&id, date(2024, 1, 1)), done(&id, date(2024, 1, 2))];

    let stats = compute(&history, date(2024, 1, 3));

    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.longest_streak, 2);
}

#[test]
fn test_uncompleted_record_today_breaks_streak() {
    let id = HabitId::new();
    let history = vec![
        done(&id, date(2024, 1, 1)),
        done(&id, date(2024, 1, 2)),
        done(&id, date(2024, 1, 3)),
        undone(&id, date(2024, 1, 4)),
    ];

    let stats = compute(&history, date(2024, 1, 4));

    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.longest_streak, 3);
    assert_eq!(stats.total_completions, 3);
}

#[test]
fn test_gap_does_not_shorten_closed_longest_streak() {
    let id = HabitId::new();
    let mut history: Vec<CompletionRecord> = (1..=5).map(|d| done(&id, date(2024, 2, d))).collect();
    history.push(done(&id, date(2024, 2, 7)));
    history.push(done(&id, date(2024, 2, 8)));

    let stats = compute(&history, date(2024, 2, 8));

    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 5);
}

#[test]
fn test_streaks_cross_month_and_year_boundaries() {
    let id = HabitId::new();
    let history = vec![
        done(&id, date(2023, 12, 30)),
        done(&id, date(2023, 12, 31)),
        done(&id, date(2024, 1, 1)),
        done(&id, date(2024, 1, 2)),
    ];

    let stats = compute(&history, date(2024, 1, 2));

    assert_eq!(stats.current_streak, 4);
    assert_eq!(stats.longest_streak, 4);
}

#[test]
fn test_leap_day_is_part_of_the_run() {
    let id = HabitId::new();
    let history = vec![
        done(&id, date(2024, 2, 28)),
        done(&id, date(2024, 2, 29)),
        done(&id, date(2024, 3, 1)),
    ];

    assert_eq!(compute(&history, date(2024, 3, 1)).current_streak, 3);
}

#[test]
fn test_longest_streak_first_element_opens_a_run() {
    // A lone early day counts as a run of one even though nothing precedes it
    let id = HabitId::new();
    let lone = compute(&[done(&id, date(2023, 6, 1))], date(2024, 1, 1));
    assert_eq!(lone.longest_streak, 1);
    assert_eq!(lone.current_streak, 0);

    // After a break the new run restarts at one and grows from there
    let history = vec![
        done(&id, date(2024, 1, 1)),
        done(&id, date(2024, 1, 3)),
        done(&id, date(2024, 1, 4)),
    ];
    assert_eq!(compute(&history, date(2024, 1, 10)).longest_streak, 2);
}

#[test]
fn test_input_order_does_not_matter() {
    let id = HabitId::new();
    let days = [
        date(2024, 3, 1),
        date(2024, 3, 2),
        date(2024, 3, 4),
        date(2024, 3, 5),
        date(2024, 3, 6),
    ];
    let ascending: Vec<CompletionRecord> = days.iter().map(|d| done(&id, *d)).collect();
    let mut shuffled = ascending.clone();
    shuffled.swap(0, 3);
    shuffled.swap(1, 4);
    let descending: Vec<CompletionRecord> = ascending.iter().rev().cloned().collect();

    let today = date(2024, 3, 6);
    let expected = compute(&ascending, today);
    assert_eq!(compute(&shuffled, today), expected);
    assert_eq!(compute(&descending, today), expected);
    assert_eq!(expected.current_streak, 3);
    assert_eq!(expected.longest_streak, 3);
}

#[test]
fn test_compute_is_deterministic() {
    let id = HabitId::new();
    let history = vec![
        done(&id, date(2024, 5, 1)),
        undone(&id, date(2024, 5, 2)),
        done(&id, date(2024, 5, 3)),
    ];
    let today = date(2024, 5, 3);

    assert_eq!(compute(&history, today), compute(&history, today));
}

#[test]
fn test_weekly_window_includes_day_seven_days_ago() {
    let id = HabitId::new();
    let today = date(2024, 1, 31);
    let history = vec![
        done(&id, date(2024, 1, 23)), // eight days ago, outside
        done(&id, date(2024, 1, 24)), // seven days ago, inside
    ];

    let stats = compute(&history, today);

    assert_eq!(stats.weekly_progress, 14);
    assert_eq!(stats.completion_rate, 6);
}

#[test]
fn test_rates_are_not_clamped_above_one_hundred() {
    let id = HabitId::new();
    let today = date(2024, 1, 31);
    // today - 7 ..= today is eight calendar days
    let history: Vec<CompletionRecord> = (24..=31).map(|d| done(&id, date(2024, 1, d))).collect();

    let stats = compute(&history, today);

    assert_eq!(stats.weekly_progress, 114);
    assert_eq!(stats.current_streak, 8);
}

#[test]
fn test_monthly_rate_over_full_window() {
    let id = HabitId::new();
    let today = date(2024, 3, 31);
    // today - 30 ..= today: 31 completed days
    let history: Vec<CompletionRecord> = (1..=31).map(|d| done(&id, date(2024, 3, d))).collect();

    let stats = compute(&history, today);

    assert_eq!(stats.completion_rate, 103);
    assert_eq!(stats.weekly_progress, 114);
    assert_eq!(stats.longest_streak, 31);
}

#[test]
fn test_future_records_count_toward_rates_but_not_streak() {
    let id = HabitId::new();
    let today = date(2024, 1, 10);
    let history = vec![done(&id, date(2024, 1, 12))];

    let stats = compute(&history, today);

    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.weekly_progress, 14);
    assert_eq!(stats.total_completions, 1);
}
