/// Derived per-habit statistics
///
/// Statistics are never stored. They are recomputed from the full completion
/// history whenever a caller asks (see `analytics::StatisticsEngine`).

use serde::{Deserialize, Serialize};

/// Streak and rate metrics for one habit
///
/// Rates are whole percentages truncated toward zero. They are not clamped:
/// more completed records than days in the window reads above 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Consecutive completed days ending today
    pub current_streak: u32,
    /// Longest run of consecutive completed days
    pub longest_streak: u32,
    /// Number of completed records
    pub total_completions: u32,
    /// Percent of the trailing 30-day window completed
    pub completion_rate: u32,
    /// Percent of the trailing 7-day window completed
    pub weekly_progress: u32,
}

impl Statistics {
    /// Short message describing the current streak
    pub fn streak_message(&self) -> String {
        match self.current_streak {
            0 => "No active streak yet. Check in today to start one.".to_string(),
            1 => "Great start! One day down.".to_string(),
            2..=6 => format!("Nice work! {} days in a row.", self.current_streak),
            7..=29 => format!("Excellent! {} days strong.", self.current_streak),
            _ => format!("Incredible! {} days of consistency.", self.current_streak),
        }
    }
}

/// Totals across every habit, as shown on the statistics overview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    /// Number of habits
    pub total_habits: u32,
    /// Habits with a completed record for today
    pub completed_today: u32,
    /// `completed_today` as a truncated percentage of `total_habits`
    pub today_progress: u32,
    /// Integer mean of each habit's completion rate
    pub average_completion_rate: u32,
    /// Sum of every habit's current streak
    pub total_current_streaks: u32,
}
