/// Database schema bootstrap
///
/// This module creates the SQLite tables and indexes the storage layer
/// needs, and records the schema version it created.

use rusqlite::Connection;
use crate::storage::StorageError;

/// Current database schema version
const CURRENT_VERSION: i32 = 1;

/// Initialize the database schema
///
/// Creates all required tables and indexes if they don't exist. Safe to call
/// on every open.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let current_version = get_current_version(conn)?;

    if current_version > CURRENT_VERSION {
        return Err(StorageError::Connection(format!(
            "Database schema version {} is newer than supported version {}",
            current_version, CURRENT_VERSION
        )));
    }

    if current_version < CURRENT_VERSION {
        create_schema_v1(conn)?;
        set_version(conn, CURRENT_VERSION)?;
    }

    Ok(())
}

/// Get the current database schema version, 0 for a fresh database
fn get_current_version(conn: &Connection) -> Result<i32, StorageError> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get::<_, i32>(0),
    )?;

    Ok(version)
}

fn set_version(conn: &Connection, version: i32) -> Result<(), StorageError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Version 1: habits and their per-day records
///
/// `habit_entries.habit_id` is deliberately not a foreign key and
/// (habit_id, date) is not unique; deletes cascade in `delete_habit` and the
/// toggle operation keeps one record per day.
fn create_schema_v1(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS habits (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            color TEXT NOT NULL,
            icon TEXT NOT NULL,
            target_frequency TEXT NOT NULL,
            target_count INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS habit_entries (
            id TEXT PRIMARY KEY,
            habit_id TEXT NOT NULL,
            date TEXT NOT NULL,
            count INTEGER NOT NULL DEFAULT 0,
            completed BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_habit_entries_habit_date
            ON habit_entries (habit_id, date);

        CREATE INDEX IF NOT EXISTS idx_habit_entries_date
            ON habit_entries (date);

        CREATE INDEX IF NOT EXISTS idx_habits_created_at
            ON habits (created_at);",
    )?;

    tracing::info!("Created database schema v1");
    Ok(())
}
