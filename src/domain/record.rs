/// CompletionRecord entity for tracking per-day habit completion
///
/// There is at most one record per (habit, date). Records are created the
/// first time a day is toggled and flipped in place afterwards.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{HabitId, RecordId};

/// Whether a habit was done on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Unique identifier for this record
    pub id: RecordId,
    /// Which habit this record belongs to
    pub habit_id: HabitId,
    /// The calendar day this record is for
    pub date: NaiveDate,
    /// Units completed that day
    pub count: u32,
    /// Whether the habit counts as done for that day
    pub completed: bool,
    /// When this record was first created
    pub created_at: DateTime<Utc>,
}

impl CompletionRecord {
    /// Create a fresh, completed record for a day
    pub fn new_completed(habit_id: HabitId, date: NaiveDate) -> Self {
        Self {
            id: RecordId::new(),
            habit_id,
            date,
            count: 1,
            completed: true,
            created_at: Utc::now(),
        }
    }

    /// Create a record from existing data (used when loading from database)
    pub fn from_existing(
        id: RecordId,
        habit_id: HabitId,
        date: NaiveDate,
        count: u32,
        completed: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            habit_id,
            date,
            count,
            completed,
            created_at,
        }
    }

    /// The record that results from toggling a (habit, date) pair
    ///
    /// With no existing record a new completed one is created. Otherwise the
    /// completed flag flips, and `count` follows it (1 when done, 0 when not).
    /// The id and creation time of an existing record are kept.
    pub fn toggle(existing: Option<CompletionRecord>, habit_id: HabitId, date: NaiveDate) -> Self {
        match existing {
            Some(mut record) => {
                record.completed = !record.completed;
                record.count = if record.completed { 1 } else { 0 };
                record
            }
            None => Self::new_completed(habit_id, date),
        }
    }
}
