mod config;
pub mod database;
pub mod memory;
pub mod migrations;

pub use config::{ClockConfig, Config, StorageConfig, WatchConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ConfigError, StorageError};

/// String key-value storage the tracker persists into.
///
/// Values are replaced whole on every `set`; there is no partial update.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }
}

/// Returns the data directory, creating it if needed.
///
/// `STUDYSTREAK_DATA_DIR` overrides the location entirely. Otherwise the
/// directory is `~/.config/studystreak[-dev]/`, with the `-dev` suffix when
/// `STUDYSTREAK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("STUDYSTREAK_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("STUDYSTREAK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("studystreak-dev")
            } else {
                base_dir.join("studystreak")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
