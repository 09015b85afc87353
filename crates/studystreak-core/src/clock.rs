//! Sources of "today".
//!
//! The tracker never reads the wall clock directly; it asks a [`Clock`].
//! Production code uses [`SystemClock`], tests pin the date with
//! [`FixedClock`] and move it forward to simulate rollovers.

use std::sync::Mutex;

use chrono::{Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Anything that can tell the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Which calendar the system clock reports dates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeZoneMode {
    /// Device-local calendar date
    #[default]
    Local,
    /// UTC calendar date
    Utc,
}

impl TimeZoneMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeZoneMode::Local => "local",
            TimeZoneMode::Utc => "utc",
        }
    }
}

impl std::str::FromStr for TimeZoneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(TimeZoneMode::Local),
            "utc" => Ok(TimeZoneMode::Utc),
            other => Err(format!("unknown timezone mode '{other}' (expected local or utc)")),
        }
    }
}

/// Wall-clock backed [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    mode: TimeZoneMode,
}

impl SystemClock {
    pub fn new(mode: TimeZoneMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> TimeZoneMode {
        self.mode
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.mode {
            TimeZoneMode::Local => Local::now().date_naive(),
            TimeZoneMode::Utc => Utc::now().date_naive(),
        }
    }
}

/// A clock pinned to a settable date.
#[derive(Debug)]
pub struct FixedClock {
    date: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    /// Move the clock to `date`.
    pub fn set(&self, date: NaiveDate) {
        *self.lock() = date;
    }

    /// Move the clock forward by `days` (backward if negative).
    pub fn advance_days(&self, days: i64) {
        let mut guard = self.lock();
        *guard += Duration::days(days);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NaiveDate> {
        // A poisoned lock still holds a valid date.
        self.date.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.lock()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
