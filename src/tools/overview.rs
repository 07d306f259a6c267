/// Tool for the all-habits statistics overview
///
/// This module implements the habit_overview MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics;
use crate::domain::Overview;
use crate::storage::HabitStorage;
use crate::tools::{resolve_date, ToolError};

/// Parameters for the overview
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct OverviewParams {
    /// Compute as of this YYYY-MM-DD day (optional, defaults to today)
    pub as_of: Option<String>,
}

/// Response with totals across habits
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub overview: Overview,
    pub message: String,
}

/// Totals across every habit
pub fn get_overview<S: HabitStorage>(
    storage: &S,
    params: OverviewParams,
    today: NaiveDate,
) -> Result<OverviewResponse, ToolError> {
    let as_of = resolve_date(params.as_of.as_deref(), today)?;
    let overview = analytics::overview(storage, as_of)?;

    let message = if overview.total_habits == 0 {
        "No habits yet. Create one to start tracking!".to_string()
    } else {
        format!(
            "📈 Today: {}/{} done ({}%)\n   Average rate (30d): {}% | Active streak days: {}",
            overview.completed_today,
            overview.total_habits,
            overview.today_progress,
            overview.average_completion_rate,
            overview.total_current_streaks
        )
    };

    Ok(OverviewResponse { overview, message })
}
