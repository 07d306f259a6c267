/// Storage layer for persisting habit data
///
/// This module handles all database operations using SQLite. It provides
/// a clean interface for storing and retrieving habits and their per-day
/// completion records.

pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDate;
use thiserror::Error;
use crate::domain::{CompletionRecord, Habit, HabitId, RecordId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Record not found: {record_id}")]
    RecordNotFound { record_id: String },

    #[error("Stored date '{value}' is not a valid YYYY-MM-DD date")]
    InvalidDate { value: String },

    #[error("Stored value is corrupt: {0}")]
    Corrupt(String),
}

/// Trait defining the storage interface for habits and completion records
///
/// The statistics engine and the toggle operation only ever talk to the
/// database through this trait.
pub trait HabitStorage {
    /// Insert a new habit
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Get a habit by ID, failing with `HabitNotFound` if it doesn't exist
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError> {
        self.find_habit(habit_id)?.ok_or_else(|| StorageError::HabitNotFound {
            habit_id: habit_id.to_string(),
        })
    }

    /// Look up a habit by ID
    fn find_habit(&self, habit_id: &HabitId) -> Result<Option<Habit>, StorageError>;

    /// Overwrite an existing habit's fields
    fn update_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Delete a habit along with all of its completion records
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError>;

    /// All habits, newest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Every record for a habit, latest date first
    fn get_completion_history(&self, habit_id: &HabitId)
        -> Result<Vec<CompletionRecord>, StorageError>;

    /// The record for a (habit, date) pair, if one exists
    fn get_record(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<Option<CompletionRecord>, StorageError>;

    /// Insert a record, or replace the one with the same id
    fn upsert_record(&self, record: &CompletionRecord) -> Result<(), StorageError>;

    /// All records dated `date`, across habits
    fn get_records_for_date(&self, date: NaiveDate) -> Result<Vec<CompletionRecord>, StorageError>;

    /// Delete a single record
    fn delete_record(&self, record_id: &RecordId) -> Result<(), StorageError>;

    /// Flip completion for a (habit, date) pair and return the stored record
    ///
    /// This is a read-modify-write. Implementations that can be reached from
    /// several callers at once must make it atomic per key.
    fn toggle_completion(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<CompletionRecord, StorageError> {
        let existing = self.get_record(habit_id, date)?;
        let record = CompletionRecord::toggle(existing, habit_id.clone(), date);
        self.upsert_record(&record)?;
        Ok(record)
    }
}
