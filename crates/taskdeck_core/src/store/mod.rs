//! Key-value persistence boundary.
//!
//! # Responsibility
//! - Define the opaque get/set byte store the task snapshot is written to.
//! - Provide SQLite-backed and in-memory store implementations.
//! - Encode/decode the full task collection under a single named slot.
//!
//! # Invariants
//! - Stores never interpret the bytes they hold.
//! - A missing or unreadable snapshot loads as an empty collection.

pub mod memory;
pub mod snapshot;
pub mod sqlite;

use crate::db::DbError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of the underlying key-value store.
///
/// Never fatal for task mutations: callers log it and keep in-memory state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("failed to encode task snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Opaque byte-oriented key-value store.
pub trait KeyValueStore {
    /// Returns the bytes stored under `key`, or `None` when the slot is empty.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
    /// Replaces the bytes stored under `key`.
    fn set(&mut self, key: &str, value: &[u8]) -> StoreResult<()>;
}
