//! In-memory key-value store.
//!
//! Stands in for device storage in tests and previews. Writes and reads can
//! be made to fail on demand, and every successful write is counted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::KeyValueStore;
use crate::error::StorageError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make subsequent reads fail (`true`) or succeed (`false`).
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes fail (`true`) or succeed (`false`).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw value under `key`, bypassing failure injection.
    pub async fn peek(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Seed `key` without counting a write.
    pub async fn insert(&self, key: &str, value: impl Into<String>) {
        self.entries.write().await.insert(key.to_string(), value.into());
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::ReadFailed {
                key: key.to_string(),
                message: "simulated read failure".into(),
            });
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteFailed {
                key: key.to_string(),
                message: "simulated write failure".into(),
            });
        }
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_set_and_count() {
        let store = MemoryStore::new();
        assert!(store.get("k").await.unwrap().is_none());
        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn injected_failures() {
        let store = MemoryStore::new();
        store.insert("k", "seed").await;
        assert_eq!(store.write_count(), 0);

        store.fail_writes(true);
        assert!(matches!(
            store.set("k", "nope").await,
            Err(StorageError::WriteFailed { .. })
        ));
        assert_eq!(store.peek("k").await.as_deref(), Some("seed"));

        store.fail_reads(true);
        assert!(matches!(
            store.get("k").await,
            Err(StorageError::ReadFailed { .. })
        ));
    }
}
