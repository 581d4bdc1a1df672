//! Task collection snapshot codec over a key-value store.
//!
//! # Responsibility
//! - Serialize the whole collection as one JSON array under one slot.
//! - Recover from absent or corrupt snapshots by starting empty.
//!
//! # Invariants
//! - `load` never fails; it logs and falls back to an empty collection.
//! - Loaded ids are unique; later duplicates are dropped.

use super::{KeyValueStore, StoreResult};
use crate::model::task::Task;
use log::{info, warn};
use std::collections::HashSet;

/// Slot name used when no storage key is configured.
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// Reads and writes the task collection blob.
pub struct TaskSnapshotStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> TaskSnapshotStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn with_default_key(store: S) -> Self {
        Self::new(store, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the last saved collection.
    ///
    /// Missing slot, store read failures and unparsable payloads all yield an
    /// empty collection.
    pub fn load(&self) -> Vec<Task> {
        let bytes = match self.store.get(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                info!(
                    "event=snapshot_load module=store status=empty key={}",
                    self.key
                );
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=snapshot_load module=store status=error error_code=store_read_failed key={} error={}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        let decoded: Vec<Task> = match serde_json::from_slice(&bytes) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    "event=snapshot_load module=store status=error error_code=snapshot_corrupt key={} bytes={} error={}",
                    self.key,
                    bytes.len(),
                    err
                );
                return Vec::new();
            }
        };

        let total = decoded.len();
        let tasks = dedupe_by_id(decoded);
        if tasks.len() != total {
            warn!(
                "event=snapshot_load module=store status=repaired key={} dropped_duplicates={}",
                self.key,
                total - tasks.len()
            );
        }
        info!(
            "event=snapshot_load module=store status=ok key={} count={}",
            self.key,
            tasks.len()
        );
        tasks
    }

    /// Writes the full collection, replacing the previous snapshot.
    pub fn save(&mut self, tasks: &[Task]) -> StoreResult<()> {
        let payload = serde_json::to_vec(tasks)?;
        self.store.set(&self.key, &payload)
    }
}

fn dedupe_by_id(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::with_capacity(tasks.len());
    tasks
        .into_iter()
        .filter(|task| seen.insert(task.id))
        .collect()
}
