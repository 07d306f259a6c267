/// Tool for listing all habits
///
/// This module implements the habit_list MCP tool.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::StatisticsEngine;
use crate::domain::{Statistics, TargetFrequency};
use crate::storage::HabitStorage;
use crate::tools::{resolve_date, ToolError};

/// Parameters for listing habits
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListHabitsParams {
    /// Compute statistics as of this YYYY-MM-DD day (optional, defaults to today)
    pub as_of: Option<String>,
}

/// Information about a habit in the list
#[derive(Debug, Serialize)]
pub struct HabitSummary {
    pub habit_id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub target_frequency: TargetFrequency,
    pub target_count: u32,
    pub completed_today: bool,
    pub statistics: Statistics,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitSummary>,
    pub message: String,
}

/// List every habit, newest first, with its statistics
pub fn list_habits<S: HabitStorage>(
    storage: &S,
    params: ListHabitsParams,
    today: NaiveDate,
) -> Result<ListHabitsResponse, ToolError> {
    let as_of = resolve_date(params.as_of.as_deref(), today)?;
    let engine = StatisticsEngine::new();

    let mut habits = Vec::new();
    for habit in storage.list_habits()? {
        let history = storage.get_completion_history(&habit.id)?;
        let completed_today = history.iter().any(|r| r.date == as_of && r.completed);
        let statistics = engine.compute(&history, as_of);

        habits.push(HabitSummary {
            habit_id: habit.id.to_string(),
            name: habit.name,
            icon: habit.icon,
            color: habit.color,
            target_frequency: habit.target_frequency,
            target_count: habit.target_count,
            completed_today,
            statistics,
        });
    }

    let message = if habits.is_empty() {
        "No habits found. Create your first habit to get started!".to_string()
    } else {
        let lines = habits
            .iter()
            .map(|h| {
                format!(
                    "{} {} {} ({})\n   {}x {} | 🔥 Streak: {} days | 📊 Rate: {}%",
                    if h.completed_today { "✅" } else { "⬜" },
                    h.icon,
                    h.name,
                    h.habit_id,
                    h.target_count,
                    h.target_frequency,
                    h.statistics.current_streak,
                    h.statistics.completion_rate
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("📋 Habits ({})\n\n{}", habits.len(), lines)
    };

    Ok(ListHabitsResponse { habits, message })
}
