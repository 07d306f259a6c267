/// Tool for checking a habit in or out for a day
///
/// This module implements the habit_toggle MCP tool. Each call flips the
/// completion state of one (habit, date) pair; calling it twice undoes it.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::compute_statistics;
use crate::domain::date::format_date;
use crate::domain::{CompletionRecord, Statistics};
use crate::storage::HabitStorage;
use crate::tools::{parse_habit_id, resolve_date, ToolError};

/// Parameters for toggling a habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ToggleHabitParams {
    /// ID of the habit to toggle
    pub habit_id: String,
    /// Day to toggle as YYYY-MM-DD (optional, defaults to today)
    pub date: Option<String>,
}

/// Response from toggling a habit
#[derive(Debug, Serialize)]
pub struct ToggleHabitResponse {
    pub record: CompletionRecord,
    pub statistics: Statistics,
    pub message: String,
}

/// Toggle completion for a habit on a day
///
/// The habit must exist, so the tool never leaves records without an owner.
pub fn toggle_habit<S: HabitStorage>(
    storage: &S,
    params: ToggleHabitParams,
    today: NaiveDate,
) -> Result<ToggleHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let date = resolve_date(params.date.as_deref(), today)?;
    let habit = storage.get_habit(&habit_id)?;

    let record = storage.toggle_completion(&habit_id, date)?;
    let statistics = compute_statistics(storage, &habit_id, today)?;

    let message = if record.completed {
        format!(
            "🔥 Marked '{}' done for {}. {}",
            habit.name,
            format_date(date),
            statistics.streak_message()
        )
    } else {
        format!(
            "↩️ Marked '{}' not done for {}. Current streak: {} day{}",
            habit.name,
            format_date(date),
            statistics.current_streak,
            if statistics.current_streak == 1 { "" } else { "s" }
        )
    };

    Ok(ToggleHabitResponse {
        record,
        statistics,
        message,
    })
}
