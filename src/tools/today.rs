/// Tool for listing one day's check-ins
///
/// This module implements the habit_today MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::date::format_date;
use crate::domain::CompletionRecord;
use crate::storage::HabitStorage;
use crate::tools::{resolve_date, ToolError};

/// Parameters for listing a day's records
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct TodayParams {
    /// Day as YYYY-MM-DD (optional, defaults to today)
    pub date: Option<String>,
}

/// Response listing a day's records
#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub date: String,
    pub records: Vec<CompletionRecord>,
    pub completed_habit_ids: Vec<String>,
    pub message: String,
}

/// Records for one day across all habits
pub fn get_today<S: HabitStorage>(
    storage: &S,
    params: TodayParams,
    today: NaiveDate,
) -> Result<TodayResponse, ToolError> {
    let date = resolve_date(params.date.as_deref(), today)?;
    let records = storage.get_records_for_date(date)?;

    let completed_habit_ids: Vec<String> = records
        .iter()
        .filter(|r| r.completed)
        .map(|r| r.habit_id.to_string())
        .collect();

    let total_habits = storage.list_habits()?.len();
    let message = format!(
        "📅 {}: {}/{} habits done",
        format_date(date),
        completed_habit_ids.len(),
        total_habits
    );

    Ok(TodayResponse {
        date: format_date(date),
        records,
        completed_habit_ids,
        message,
    })
}
