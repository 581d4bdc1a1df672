//! In-memory key-value store.

use super::{KeyValueStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// `HashMap`-backed store for tests and ephemeral sessions.
///
/// Clones share the same slots, so a test can keep one handle while a
/// repository owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    slots: Mutex<HashMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set` fail with `StoreError::Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Returns a copy of the raw bytes under `key`.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.lock_slots().ok()?.get(key).cloned()
    }

    /// Writes raw bytes directly, bypassing failure injection.
    pub fn put_raw(&self, key: &str, value: impl Into<Vec<u8>>) {
        if let Ok(mut slots) = self.lock_slots() {
            slots.insert(key.to_string(), value.into());
        }
    }

    fn lock_slots(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.inner
            .slots
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.lock_slots()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> StoreResult<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "memory store rejects writes".to_string(),
            ));
        }
        self.lock_slots()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKvStore;
    use crate::store::{KeyValueStore, StoreError};

    #[test]
    fn clones_share_slots() {
        let observer = MemoryKvStore::new();
        let mut writer = observer.clone();
        writer.set("tasks", b"[]").unwrap();
        assert_eq!(observer.raw("tasks").as_deref(), Some(&b"[]"[..]));
    }

    #[test]
    fn failing_writes_keep_previous_value() {
        let mut store = MemoryKvStore::new();
        store.set("k", b"v1").unwrap();
        store.set_fail_writes(true);

        let err = store.set("k", b"v2").unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"v1"[..]));
    }
}
