//! SQLite-backed key-value store.
//!
//! Persists string values under string keys in a single `kv` table,
//! standing in for device-local storage. Each write replaces the value
//! whole and stamps `updated_at`.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, migrations, KeyValueStore};
use crate::error::{StorageError, StreakError};

/// Default database file name inside the data directory.
pub const DEFAULT_DATABASE_FILE: &str = "studystreak.db";

/// SQLite database holding the key-value table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").field("path", &self.path).finish()
    }
}

impl SqliteStore {
    /// Open `file_name` inside the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open(file_name: &str) -> Result<Self, StreakError> {
        let path = data_dir()?.join(file_name);
        Ok(Self::open_at(path)?)
    }

    /// Open (creating if needed) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path).map_err(|source| StorageError::Open {
            path: path.clone(),
            source,
        })?;
        Self::init(conn, Some(path))
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Self::init(conn, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self, StorageError> {
        migrations::migrate(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// On-disk location, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// When `key` was last written, if it exists and carries a timestamp.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, StorageError> {
        let conn = self.lock();
        let raw: Option<String> = conn
            .query_row(
                "SELECT updated_at FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::read(key, e))?;

        Ok(raw
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }

    fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.lock();
        conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| StorageError::read(key, e))
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.lock();
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )
        .map_err(|e| StorageError::write(key, e))?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // Statements never leave the connection half-updated.
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.kv_get(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.kv_set(key, value)
    }
}
