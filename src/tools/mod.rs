/// MCP tools for habit management
///
/// This module contains all the MCP tools that external clients can call to
/// interact with the habit tracker. Each tool takes a parameter struct,
/// the storage, and (where dates matter) the caller's current day.

pub mod create;
pub mod delete;
pub mod list;
pub mod overview;
pub mod stats;
pub mod today;
pub mod toggle;
pub mod update;

// Re-export tool functions for easy access
pub use create::*;
pub use delete::*;
pub use list::*;
pub use overview::*;
pub use stats::*;
pub use today::*;
pub use toggle::*;
pub use update::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::date::parse_date;
use crate::domain::{DomainError, HabitId};
use crate::storage::StorageError;

/// Errors a tool call can fail with
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Parse a habit id argument
pub(crate) fn parse_habit_id(value: &str) -> Result<HabitId, ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::InvalidParams("habit_id cannot be empty".to_string()));
    }
    HabitId::from_string(value)
        .map_err(|_| ToolError::InvalidParams(format!("'{}' is not a valid habit id", value)))
}

/// Use the given `YYYY-MM-DD` date, or `today` when none was passed
pub(crate) fn resolve_date(value: Option<&str>, today: NaiveDate) -> Result<NaiveDate, ToolError> {
    match value {
        Some(text) => Ok(parse_date(text.trim())?),
        None => Ok(today),
    }
}
