/// SQLite implementation of the habit storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving habits and completion records. It handles all SQL queries
/// and data conversion.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

use crate::domain::date::{format_date, parse_date};
use crate::domain::{CompletionRecord, Habit, HabitId, RecordId, TargetFrequency};
use crate::storage::{migrations, HabitStorage, StorageError};

const HABIT_COLUMNS: &str =
    "id, name, description, color, icon, target_frequency, target_count, created_at, updated_at";

const RECORD_COLUMNS: &str = "id, habit_id, date, count, completed, created_at";

/// SQLite-based storage implementation
///
/// Each instance owns one connection. It is opened and closed explicitly;
/// there is no shared global handle.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database file at `db_path`
    ///
    /// Runs the schema bootstrap so the tables exist before first use.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path).map_err(|e| {
            let message = format!("Failed to open database {}: {}", db_path.display(), e);
            StorageError::Connection(message)
        })?;

        let storage = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {}", db_path.display());
        Ok(storage)
    }

    /// Open a private in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            StorageError::Connection(format!("Failed to open in-memory database: {}", e))
        })?;

        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        // Concurrent toggles from other connections wait instead of failing
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(|e| StorageError::Connection(format!("Failed to set busy timeout: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    /// Close the connection, reporting any error SQLite raises on shutdown
    pub fn close(self) -> Result<(), StorageError> {
        self.conn.close().map_err(|(_, e)| StorageError::Query(e))?;
        tracing::debug!("SQLite storage closed");
        Ok(())
    }
}

/// Columns of a `habits` row before domain conversion
struct HabitRow {
    id: String,
    name: String,
    description: Option<String>,
    color: String,
    icon: String,
    target_frequency: String,
    target_count: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl HabitRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            color: row.get(3)?,
            icon: row.get(4)?,
            target_frequency: row.get(5)?,
            target_count: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn into_habit(self) -> Result<Habit, StorageError> {
        let id = HabitId::from_string(&self.id)
            .map_err(|_| StorageError::Corrupt(format!("habit id '{}'", self.id)))?;
        let target_frequency: TargetFrequency = self
            .target_frequency
            .parse()
            .map_err(|_| {
                StorageError::Corrupt(format!("target frequency '{}'", self.target_frequency))
            })?;

        Ok(Habit::from_existing(
            id,
            self.name,
            self.description,
            self.color,
            self.icon,
            target_frequency,
            self.target_count,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Columns of a `habit_entries` row before domain conversion
struct RecordRow {
    id: String,
    habit_id: String,
    date: String,
    count: u32,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl RecordRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            habit_id: row.get(1)?,
            date: row.get(2)?,
            count: row.get(3)?,
            completed: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn into_record(self) -> Result<CompletionRecord, StorageError> {
        let id = RecordId::from_string(&self.id)
            .map_err(|_| StorageError::Corrupt(format!("record id '{}'", self.id)))?;
        let habit_id = HabitId::from_string(&self.habit_id)
            .map_err(|_| StorageError::Corrupt(format!("habit id '{}'", self.habit_id)))?;
        let date = parse_date(&self.date).map_err(|_| StorageError::InvalidDate {
            value: self.date.clone(),
        })?;

        Ok(CompletionRecord::from_existing(
            id,
            habit_id,
            date,
            self.count,
            self.completed,
            self.created_at,
        ))
    }
}

/// Run a record query and convert every row
fn query_records<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<CompletionRecord>, StorageError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, RecordRow::read)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?.into_record()?);
    }
    Ok(records)
}

fn select_record(
    conn: &Connection,
    habit_id: &HabitId,
    date: NaiveDate,
) -> Result<Option<CompletionRecord>, StorageError> {
    let sql = format!(
        "SELECT {} FROM habit_entries
         WHERE habit_id = ?1 AND date = ?2
         ORDER BY created_at LIMIT 1",
        RECORD_COLUMNS
    );
    let row = conn
        .query_row(&sql, params![habit_id.to_string(), format_date(date)], RecordRow::read)
        .optional()?;

    row.map(RecordRow::into_record).transpose()
}

fn write_record(conn: &Connection, record: &CompletionRecord) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO habit_entries (id, habit_id, date, count, completed, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
            habit_id = excluded.habit_id,
            date = excluded.date,
            count = excluded.count,
            completed = excluded.completed",
        params![
            record.id.to_string(),
            record.habit_id.to_string(),
            format_date(record.date),
            record.count,
            record.completed,
            record.created_at,
        ],
    )?;
    Ok(())
}

impl HabitStorage for SqliteStorage {
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO habits (
                id, name, description, color, icon, target_frequency,
                target_count, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                habit.id.to_string(),
                habit.name,
                habit.description,
                habit.color,
                habit.icon,
                habit.target_frequency.as_str(),
                habit.target_count,
                habit.created_at,
                habit.updated_at,
            ],
        )?;

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn find_habit(&self, habit_id: &HabitId) -> Result<Option<Habit>, StorageError> {
        let sql = format!("SELECT {} FROM habits WHERE id = ?1", HABIT_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, params![habit_id.to_string()], HabitRow::read)
            .optional()?;

        row.map(HabitRow::into_habit).transpose()
    }

    fn update_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "UPDATE habits SET
                name = ?2,
                description = ?3,
                color = ?4,
                icon = ?5,
                target_frequency = ?6,
                target_count = ?7,
                updated_at = ?8
             WHERE id = ?1",
            params![
                habit.id.to_string(),
                habit.name,
                habit.description,
                habit.color,
                habit.icon,
                habit.target_frequency.as_str(),
                habit.target_count,
                habit.updated_at,
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit.id.to_string(),
            });
        }

        tracing::debug!("Updated habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;

        let rows_affected =
            tx.execute("DELETE FROM habits WHERE id = ?1", params![habit_id.to_string()])?;
        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }

        let records_removed = tx.execute(
            "DELETE FROM habit_entries WHERE habit_id = ?1",
            params![habit_id.to_string()],
        )?;
        tx.commit()?;

        tracing::debug!("Deleted habit {} and {} records", habit_id, records_removed);
        Ok(())
    }

    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let sql = format!("SELECT {} FROM habits ORDER BY created_at DESC", HABIT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], HabitRow::read)?;

        let mut habits = Vec::new();
        for row in rows {
            habits.push(row?.into_habit()?);
        }
        Ok(habits)
    }

    fn get_completion_history(
        &self,
        habit_id: &HabitId,
    ) -> Result<Vec<CompletionRecord>, StorageError> {
        let sql = format!(
            "SELECT {} FROM habit_entries WHERE habit_id = ?1 ORDER BY date DESC",
            RECORD_COLUMNS
        );
        query_records(&self.conn, &sql, params![habit_id.to_string()])
    }

    fn get_record(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<Option<CompletionRecord>, StorageError> {
        select_record(&self.conn, habit_id, date)
    }

    fn upsert_record(&self, record: &CompletionRecord) -> Result<(), StorageError> {
        write_record(&self.conn, record)?;
        tracing::debug!(
            "Upserted record {} for habit {} on {}",
            record.id,
            record.habit_id,
            record.date
        );
        Ok(())
    }

    fn get_records_for_date(&self, date: NaiveDate) -> Result<Vec<CompletionRecord>, StorageError> {
        let sql = format!("SELECT {} FROM habit_entries WHERE date = ?1", RECORD_COLUMNS);
        query_records(&self.conn, &sql, params![format_date(date)])
    }

    fn delete_record(&self, record_id: &RecordId) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "DELETE FROM habit_entries WHERE id = ?1",
            params![record_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::RecordNotFound {
                record_id: record_id.to_string(),
            });
        }

        tracing::debug!("Deleted record {}", record_id);
        Ok(())
    }

    /// Toggle inside an IMMEDIATE transaction
    ///
    /// The write lock is taken before the read, so two connections toggling
    /// the same (habit, date) run one after the other.
    fn toggle_completion(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<CompletionRecord, StorageError> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;

        let existing = select_record(&tx, habit_id, date)?;
        let record = CompletionRecord::toggle(existing, habit_id.clone(), date);
        write_record(&tx, &record)?;
        tx.commit()?;

        tracing::debug!(
            "Toggled habit {} on {}: completed={}",
            habit_id,
            format_date(date),
            record.completed
        );
        Ok(record)
    }
}
