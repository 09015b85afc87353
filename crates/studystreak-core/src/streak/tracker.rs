//! Persisted 7-day study window.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::window::{Reconciliation, StreakWindow};
use super::{StreakSummary, StudyDayRecord};
use crate::clock::Clock;
use crate::error::{Result, StorageError, StreakError};
use crate::storage::KeyValueStore;

/// Storage key the window is persisted under unless configured otherwise.
pub const DEFAULT_STREAK_KEY: &str = "study_streak";

/// Keeps the study window persisted and anchored to the clock's today.
///
/// Reads never fail: missing, unreadable or corrupt data is answered with a
/// fresh window. [`mark_today`](Self::mark_today) reports both unreadable
/// storage and failed writes to the caller and leaves the stored window as
/// it was.
///
/// `mark_today` is a plain read-modify-write. Two overlapping calls resolve
/// last-write-wins; callers that can double-fire should debounce.
pub struct StreakTracker<S, C> {
    store: S,
    clock: C,
    key: String,
}

impl<S: KeyValueStore, C: Clock> StreakTracker<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self::with_key(store, clock, DEFAULT_STREAK_KEY)
    }

    pub fn with_key(store: S, clock: C, key: impl Into<String>) -> Self {
        Self {
            store,
            clock,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The window ending today, rolling the stored one forward if needed.
    ///
    /// Writes only when the stored window had to change. A failed write is
    /// logged and the computed window is still returned. If the store cannot
    /// be read at all, a fresh window is returned and nothing is written.
    pub async fn get_window(&self) -> StreakWindow {
        match self.current_window().await {
            Ok(window) => window,
            Err(e) => {
                // Whatever the store holds may still be intact.
                warn!(key = %self.key, error = %e, "failed to read study window");
                StreakWindow::fresh(self.clock.today())
            }
        }
    }

    /// Mark today as studied, optionally recording hours.
    ///
    /// Passing `None` keeps hours recorded by an earlier mark today.
    ///
    /// # Errors
    /// Returns [`StreakError::InvalidHours`] for negative or non-finite
    /// hours, without touching storage, and [`StreakError::Storage`] when
    /// the stored window cannot be read or the updated one cannot be
    /// written. A failed read writes nothing.
    pub async fn mark_today(&self, hours: Option<f64>) -> Result<StreakWindow> {
        if let Some(value) = hours {
            if !value.is_finite() || value < 0.0 {
                return Err(StreakError::InvalidHours { value });
            }
        }

        let mut window = self.current_window().await?;
        let was_completed = window.latest().completed;
        window.mark_latest(hours);
        self.persist(&window).await?;

        info!(
            date = %window.last_date(),
            hours = ?window.latest().study_hours,
            remark = was_completed,
            streak = window.current_streak(),
            "marked day as studied"
        );
        Ok(window)
    }

    /// Whether today is already marked studied.
    pub async fn is_marked_today(&self) -> bool {
        self.get_window().await.latest().completed
    }

    /// Aggregates over the current window.
    pub async fn summary(&self) -> StreakSummary {
        StreakSummary::from_window(&self.get_window().await)
    }

    /// Stored window reconciled with today, persisted when it changed.
    ///
    /// Only a failing backend read is an error; missing or corrupt data
    /// yields a fresh window.
    async fn current_window(&self) -> Result<StreakWindow, StorageError> {
        let today = self.clock.today();
        let stored = self.read_records().await?;

        let (window, outcome) = StreakWindow::reconcile(stored, today);
        match outcome {
            Reconciliation::Unchanged => {}
            Reconciliation::Fresh => debug!(%today, "synthesized fresh study window"),
            Reconciliation::Advanced { days } => {
                debug!(%today, days, "rolled study window forward")
            }
            Reconciliation::Rebuilt => warn!(%today, "rebuilt malformed study window"),
        }

        if outcome.needs_write() {
            if let Err(e) = self.persist(&window).await {
                warn!(key = %self.key, error = %e, "failed to persist study window");
            }
        }
        Ok(window)
    }

    /// Stored records, empty when missing or corrupt.
    async fn read_records(&self) -> Result<Vec<StudyDayRecord>, StorageError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "discarding unparseable study window");
            Vec::new()
        }))
    }

    async fn persist(&self, window: &StreakWindow) -> Result<()> {
        let json = serde_json::to_string(window)?;
        self.store.set(&self.key, &json).await?;
        Ok(())
    }
}
