/// Analytics engine for streak and completion statistics
///
/// `StatisticsEngine::compute` is a pure function of a habit's completion
/// history and the reference day. The store-backed helpers below only load
/// the history and hand it over.

use chrono::NaiveDate;

use crate::domain::date::{days_before, is_next_day};
use crate::domain::{CompletionRecord, HabitId, Overview, Statistics};
use crate::storage::{HabitStorage, StorageError};

/// Days in the weekly progress window
pub const WEEK_WINDOW_DAYS: u32 = 7;

/// Days in the completion rate window
pub const MONTH_WINDOW_DAYS: u32 = 30;

/// Computes derived statistics from completion records
///
/// Holds no state; every call recomputes from the full history.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsEngine;

impl StatisticsEngine {
    /// Create a new statistics engine
    pub fn new() -> Self {
        Self
    }

    /// Compute statistics for one habit's records as of `today`
    ///
    /// Records may come in any order. Only completed records count.
    pub fn compute(&self, history: &[CompletionRecord], today: NaiveDate) -> Statistics {
        let mut completed: Vec<NaiveDate> = history
            .iter()
            .filter(|record| record.completed)
            .map(|record| record.date)
            .collect();

        if completed.is_empty() {
            return Statistics::default();
        }

        completed.sort_unstable();

        Statistics {
            current_streak: Self::current_streak(&completed, today),
            longest_streak: Self::longest_streak(&completed),
            total_completions: completed.len() as u32,
            completion_rate: Self::window_rate(&completed, today, MONTH_WINDOW_DAYS),
            weekly_progress: Self::window_rate(&completed, today, WEEK_WINDOW_DAYS),
        }
    }

    /// Consecutive completed days walking back from `today`
    ///
    /// A missing `today` ends the streak at 0 even if yesterday was done.
    fn current_streak(sorted: &[NaiveDate], today: NaiveDate) -> u32 {
        let mut streak = 0;
        let mut day = Some(today);

        while let Some(current) = day {
            if sorted.binary_search(&current).is_err() {
                break;
            }
            streak += 1;
            day = current.pred_opt();
        }

        streak
    }

    /// Longest run of dates exactly one day apart
    ///
    /// The first date always opens a run of 1. When a run breaks, the next
    /// run restarts at 1 without re-checking the maximum, so the maximum
    /// only moves while a run is being extended.
    fn longest_streak(sorted: &[NaiveDate]) -> u32 {
        let mut longest = 0;
        let mut running = 0;

        for (i, date) in sorted.iter().enumerate() {
            if i == 0 || is_next_day(sorted[i - 1], *date) {
                running += 1;
                longest = longest.max(running);
            } else {
                running = 1;
            }
        }

        longest
    }

    /// Percent of `window_days` covered by records dated on or after
    /// `today - window_days`, truncated and not clamped
    fn window_rate(sorted: &[NaiveDate], today: NaiveDate, window_days: u32) -> u32 {
        let start = days_before(today, u64::from(window_days));
        let start_index = sorted.partition_point(|date| *date < start);
        let in_window = (sorted.len() - start_index) as u32;

        in_window * 100 / window_days
    }
}

/// Load a habit's history and compute its statistics
///
/// An unknown habit has no history, so it yields all-zero statistics.
pub fn compute_statistics<S: HabitStorage>(
    storage: &S,
    habit_id: &HabitId,
    today: NaiveDate,
) -> Result<Statistics, StorageError> {
    let history = storage.get_completion_history(habit_id)?;
    let stats = StatisticsEngine::new().compute(&history, today);

    tracing::debug!(
        "Statistics for {}: {} records, current streak {}",
        habit_id,
        history.len(),
        stats.current_streak
    );
    Ok(stats)
}

/// Totals across all habits as of `today`
pub fn overview<S: HabitStorage>(storage: &S, today: NaiveDate) -> Result<Overview, StorageError> {
    let habits = storage.list_habits()?;
    let total_habits = habits.len() as u32;

    let todays_records = storage.get_records_for_date(today)?;
    let completed_today = habits
        .iter()
        .filter(|habit| {
            todays_records
                .iter()
                .any(|record| record.habit_id == habit.id && record.completed)
        })
        .count() as u32;

    let mut rate_sum = 0;
    let mut total_current_streaks = 0;
    for habit in &habits {
        let stats = compute_statistics(storage, &habit.id, today)?;
        rate_sum += stats.completion_rate;
        total_current_streaks += stats.current_streak;
    }

    let (today_progress, average_completion_rate) = if total_habits == 0 {
        (0, 0)
    } else {
        (completed_today * 100 / total_habits, rate_sum / total_habits)
    };

    Ok(Overview {
        total_habits,
        completed_today,
        today_progress,
        average_completion_rate,
        total_current_streaks,
    })
}
