//! Core domain logic for Taskdeck.
//! This crate is the single source of truth for task invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::priority::{ParsePriorityError, Priority};
pub use model::task::{Task, TaskDraft, TaskId, TaskValidationError};
pub use repo::task_repo::{TaskError, TaskEvent, TaskRepository, TaskResult};
pub use service::edit_session::{EditSession, EditState};
pub use service::sort_policy::{compare, sorted_view};
pub use service::task_board::{IntentOutcome, SubmitAction, TaskBoard};
pub use store::memory::MemoryKvStore;
pub use store::snapshot::{TaskSnapshotStore, DEFAULT_STORAGE_KEY};
pub use store::sqlite::SqliteKvStore;
pub use store::{KeyValueStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Opens a board backed by the SQLite file and slot named in `config`.
pub fn open_board(config: &CoreConfig) -> Result<TaskBoard<SqliteKvStore>, StoreError> {
    let store = SqliteKvStore::open(&config.db_path)?;
    Ok(TaskBoard::open(TaskSnapshotStore::new(
        store,
        config.storage_key.as_str(),
    )))
}
