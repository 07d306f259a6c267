/// Public library interface for the DailyPod habit tracker
///
/// This module exports the server, the domain types, the storage layer and
/// the statistics engine so they can be used by other applications or tests.

use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

pub mod analytics;
pub mod domain;
pub mod storage;
pub mod tools;
mod mcp;

// Re-export public modules and types
pub use analytics::{compute_statistics, StatisticsEngine};
pub use domain::*;
pub use mcp::{protocol, tool_definitions, McpServer};
pub use storage::{HabitStorage, SqliteStorage, StorageError};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The habit tracker: a store plus the statistics engine
///
/// Constructed explicitly around one database and closed explicitly when
/// done; nothing is shared process-wide.
pub struct DailyPodServer {
    storage: SqliteStorage,
    engine: StatisticsEngine,
    /// Fixed "today" used instead of the local calendar day
    today_override: Option<NaiveDate>,
}

impl DailyPodServer {
    /// Open the tracker on the database at `db_path`
    ///
    /// This will initialize the SQLite schema if it doesn't already exist.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, ServerError> {
        tracing::info!("Initializing DailyPod with database: {}", db_path.as_ref().display());

        let storage = SqliteStorage::open(db_path)?;
        Ok(Self::with_storage(storage))
    }

    /// Build the tracker around an already opened store
    pub fn with_storage(storage: SqliteStorage) -> Self {
        Self {
            storage,
            engine: StatisticsEngine::new(),
            today_override: None,
        }
    }

    /// Pin the tracker's notion of today, instead of following the clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today_override = Some(today);
        self
    }

    /// The day that "today" refers to for toggles and statistics
    pub fn today(&self) -> NaiveDate {
        self.today_override.unwrap_or_else(domain::date::today)
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// Returns once stdin is closed; the database is closed on the way out.
    pub async fn run(self) -> Result<(), ServerError> {
        let habits = self.storage.list_habits()?;
        tracing::info!("Server started, found {} existing habits", habits.len());

        let mut mcp_server = McpServer::new(self);
        mcp_server.run().await?;

        mcp_server.into_inner().close()
    }

    /// Flip completion of a habit for `date`, or for today when `None`
    pub fn toggle(
        &self,
        habit_id: &HabitId,
        date: Option<NaiveDate>,
    ) -> Result<CompletionRecord, ServerError> {
        let date = date.unwrap_or_else(|| self.today());
        Ok(self.storage.toggle_completion(habit_id, date)?)
    }

    /// Statistics for a habit as of today
    pub fn compute_statistics(&self, habit_id: &HabitId) -> Result<Statistics, ServerError> {
        Ok(analytics::compute_statistics(&self.storage, habit_id, self.today())?)
    }

    /// Get a reference to the storage layer
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Get a reference to the statistics engine
    pub fn engine(&self) -> &StatisticsEngine {
        &self.engine
    }

    /// Close the underlying database
    pub fn close(self) -> Result<(), ServerError> {
        self.storage.close()?;
        Ok(())
    }
}
