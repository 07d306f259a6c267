/// Tool for creating new habits
///
/// This module implements the habit_create MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Habit, TargetFrequency, DEFAULT_COLOR, DEFAULT_ICON};
use crate::storage::HabitStorage;
use crate::tools::ToolError;

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Hex color like #3B82F6 (optional)
    pub color: Option<String>,
    /// Icon, usually one emoji (optional)
    pub icon: Option<String>,
    /// daily, weekly, monthly, quarterly or annually (default: daily)
    pub target_frequency: Option<String>,
    /// Units to complete per period (default: 1)
    pub target_count: Option<u32>,
}

/// Response from creating a habit
#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub habit: Habit,
    pub message: String,
}

/// Create a new habit using the provided storage
pub fn create_habit<S: HabitStorage>(
    storage: &S,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ToolError> {
    let target_frequency = match params.target_frequency {
        Some(text) => text.parse::<TargetFrequency>()?,
        None => TargetFrequency::default(),
    };

    let habit = Habit::new(
        params.name,
        params.description,
        params.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        params.icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
        target_frequency,
        params.target_count.unwrap_or(1),
    )?;

    storage.create_habit(&habit)?;

    let message = format!(
        "✅ Created habit {} '{}' ({})\nHabit ID: {}",
        habit.icon,
        habit.name,
        habit.target_display(),
        habit.id
    );

    Ok(CreateHabitResponse { habit, message })
}
