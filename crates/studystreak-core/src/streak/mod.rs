//! Study streak tracking.
//!
//! A streak is the run of consecutive studied days ending at the most recent
//! day of a 7-day [`StreakWindow`]. The [`StreakTracker`] keeps that window
//! persisted and anchored to today; everything else here is pure folds over
//! a window.

mod tracker;
mod window;

pub use tracker::{StreakTracker, DEFAULT_STREAK_KEY};
pub use window::{StreakWindow, WINDOW_DAYS};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One calendar day of study activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyDayRecord {
    pub date: NaiveDate,
    pub completed: bool,
    /// Hours studied; only set on completed days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub study_hours: Option<f64>,
}

impl StudyDayRecord {
    pub fn incomplete(date: NaiveDate) -> Self {
        Self {
            date,
            completed: false,
            study_hours: None,
        }
    }
}

/// Consecutive completed days counted backward from the last entry.
///
/// Stops at the first incomplete day, so `[F,F,F,T,T,F,T]` yields 1.
pub fn current_streak_length(window: &StreakWindow) -> u32 {
    window
        .iter()
        .rev()
        .take_while(|day| day.completed)
        .count() as u32
}

/// Aggregates shown next to the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub current_streak: u32,
    /// Completed days anywhere in the window.
    pub completed_days: u32,
    /// Largest recorded hours among completed days, 0 when none recorded.
    pub max_study_hours: f64,
    pub total_study_hours: f64,
    /// Completed days in the calendar month of the window's last day.
    pub completed_this_month: u32,
}

impl StreakSummary {
    pub fn from_window(window: &StreakWindow) -> Self {
        let last = window.last_date();
        let completed = || window.iter().filter(|d| d.completed);

        let hours = || completed().filter_map(|d| d.study_hours);

        Self {
            current_streak: current_streak_length(window),
            completed_days: completed().count() as u32,
            max_study_hours: hours().fold(0.0, f64::max),
            total_study_hours: hours().sum(),
            completed_this_month: completed()
                .filter(|d| d.date.year() == last.year() && d.date.month() == last.month())
                .count() as u32,
        }
    }
}
