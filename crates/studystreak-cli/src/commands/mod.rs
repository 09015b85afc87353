pub mod config;
pub mod stats;
pub mod streak;

use studystreak_core::{Config, SqliteStore, StreakTracker, SystemClock};

pub type Tracker = StreakTracker<SqliteStore, SystemClock>;

/// Tracker over the configured database, key and calendar.
pub fn open_tracker(config: &Config) -> Result<Tracker, Box<dyn std::error::Error>> {
    let store = SqliteStore::open(&config.storage.database)?;
    tracing::debug!(path = ?store.path(), key = %config.storage.key, "opened streak store");
    Ok(StreakTracker::with_key(
        store,
        config.clock(),
        config.storage.key.clone(),
    ))
}
