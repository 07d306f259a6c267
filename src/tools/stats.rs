/// Tool for reading one habit's statistics
///
/// This module implements the habit_stats MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::compute_statistics;
use crate::domain::Statistics;
use crate::storage::HabitStorage;
use crate::tools::{parse_habit_id, resolve_date, ToolError};

/// Parameters for reading habit statistics
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HabitStatsParams {
    /// ID of the habit
    pub habit_id: String,
    /// Compute as of this YYYY-MM-DD day (optional, defaults to today)
    pub as_of: Option<String>,
}

/// Response with a habit's statistics
#[derive(Debug, Serialize)]
pub struct HabitStatsResponse {
    pub habit_id: String,
    pub name: Option<String>,
    pub statistics: Statistics,
    pub message: String,
}

/// Compute statistics for one habit
///
/// An id with no stored habit reports all-zero statistics rather than an error.
pub fn get_habit_stats<S: HabitStorage>(
    storage: &S,
    params: HabitStatsParams,
    today: NaiveDate,
) -> Result<HabitStatsResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let as_of = resolve_date(params.as_of.as_deref(), today)?;

    let name = storage.find_habit(&habit_id)?.map(|habit| habit.name);
    let statistics = compute_statistics(storage, &habit_id, as_of)?;

    let title = name.as_deref().unwrap_or("Unknown habit");
    let message = format!(
        "📊 {}\n   Current streak: {} days | Best: {} days | Total done: {}\n   \
         Success rate (30d): {}% | This week: {}%\n   {}",
        title,
        statistics.current_streak,
        statistics.longest_streak,
        statistics.total_completions,
        statistics.completion_rate,
        statistics.weekly_progress,
        statistics.streak_message()
    );

    Ok(HabitStatsResponse {
        habit_id: habit_id.to_string(),
        name,
        statistics,
        message,
    })
}
