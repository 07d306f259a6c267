/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, CompletionRecord, Statistics)
/// and their validation rules, plus the calendar-date helpers every layer
/// shares.

pub mod date;
pub mod habit;
pub mod record;
pub mod statistics;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use record::*;
pub use statistics::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
