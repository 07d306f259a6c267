/// Tool for updating existing habits
///
/// This module implements the habit_update MCP tool to modify the display
/// fields of an existing habit.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Habit, TargetFrequency};
use crate::storage::HabitStorage;
use crate::tools::{parse_habit_id, ToolError};

/// Parameters for updating an existing habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateHabitParams {
    /// ID of the habit to update
    pub habit_id: String,
    /// New name (optional)
    pub name: Option<String>,
    /// New description; an empty string clears it (optional)
    pub description: Option<String>,
    /// New hex color (optional)
    pub color: Option<String>,
    /// New icon (optional)
    pub icon: Option<String>,
    /// New frequency (optional)
    pub target_frequency: Option<String>,
    /// New target count (optional)
    pub target_count: Option<u32>,
}

/// Response from updating a habit
#[derive(Debug, Serialize)]
pub struct UpdateHabitResponse {
    pub habit: Habit,
    pub message: String,
}

/// Update an existing habit using the provided storage
pub fn update_habit<S: HabitStorage>(
    storage: &S,
    params: UpdateHabitParams,
) -> Result<UpdateHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let mut habit = storage.get_habit(&habit_id)?;

    let target_frequency = params
        .target_frequency
        .map(|text| text.parse::<TargetFrequency>())
        .transpose()?;
    let description = params
        .description
        .map(|text| if text.trim().is_empty() { None } else { Some(text) });

    habit.update(
        params.name,
        description,
        params.color,
        params.icon,
        target_frequency,
        params.target_count,
    )?;

    storage.update_habit(&habit)?;

    let message = format!("✅ Updated habit '{}'", habit.name);
    Ok(UpdateHabitResponse { habit, message })
}
