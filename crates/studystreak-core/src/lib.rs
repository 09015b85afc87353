//! # StudyStreak Core Library
//!
//! This library tracks daily study activity for the StudyStreak companion
//! app. It keeps a rolling seven-day window of study records persisted in
//! local storage and derives the current streak from it. The CLI binary is a
//! thin front end over the same library.
//!
//! ## Architecture
//!
//! - **Streak**: the 7-day window, its rollover rules and the streak folds
//! - **Storage**: async key-value backends (SQLite on disk, in-memory) and
//!   TOML-based configuration
//! - **Clock**: injectable source of "today"
//!
//! ## Key Components
//!
//! - [`StreakTracker`]: persisted window anchored to the clock's today
//! - [`StreakWindow`]: seven contiguous daily records
//! - [`KeyValueStore`]: storage backend trait
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod storage;
pub mod streak;

pub use clock::{Clock, FixedClock, SystemClock, TimeZoneMode};
pub use error::{ConfigError, Result, StorageError, StreakError, WindowError};
pub use storage::{Config, KeyValueStore, MemoryStore, SqliteStore};
pub use streak::{
    current_streak_length, StreakSummary, StreakTracker, StreakWindow, StudyDayRecord,
    DEFAULT_STREAK_KEY, WINDOW_DAYS,
};
