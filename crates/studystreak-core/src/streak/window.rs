//! The trailing 7-day window and the rules that keep it anchored to today.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::StudyDayRecord;
use crate::error::WindowError;

/// Number of days tracked by a window.
pub const WINDOW_DAYS: usize = 7;

/// Trailing run of [`WINDOW_DAYS`] contiguous daily records, oldest first.
///
/// Every window handed out by this crate satisfies the shape invariants:
/// exactly seven entries, each date one day after the previous one, and
/// hours only on completed days as a finite non-negative number. The
/// only ways to change a window's contents are rolling it forward to a new
/// day and marking the last day as studied, both of which replace it whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StudyDayRecord>", into = "Vec<StudyDayRecord>")]
pub struct StreakWindow {
    days: Vec<StudyDayRecord>,
}

/// How a stored window was brought in line with today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reconciliation {
    /// Nothing usable was stored; a fresh window was synthesized.
    Fresh,
    /// The stored window already ends today.
    Unchanged,
    /// The stored window ended before today and was rolled forward.
    Advanced { days: i64 },
    /// The stored window was malformed or ended after today.
    Rebuilt,
}

impl Reconciliation {
    /// Whether the reconciled window differs from what is stored.
    pub(crate) fn needs_write(&self) -> bool {
        !matches!(self, Reconciliation::Unchanged)
    }
}

impl StreakWindow {
    /// Seven incomplete days ending on `today`.
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            days: window_dates(today).map(StudyDayRecord::incomplete).collect(),
        }
    }

    /// Build a window from records, checking length, contiguity and hours.
    pub fn from_records(days: Vec<StudyDayRecord>) -> Result<Self, WindowError> {
        validate(&days)?;
        Ok(Self { days })
    }

    pub fn days(&self) -> &[StudyDayRecord] {
        &self.days
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StudyDayRecord> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Earliest date in the window.
    pub fn first_date(&self) -> NaiveDate {
        self.days[0].date
    }

    /// Most recent date in the window.
    pub fn last_date(&self) -> NaiveDate {
        self.days[self.days.len() - 1].date
    }

    /// Record for the most recent day.
    pub fn latest(&self) -> &StudyDayRecord {
        &self.days[self.days.len() - 1]
    }

    /// Record for `date`, if it falls inside the window.
    pub fn get(&self, date: NaiveDate) -> Option<&StudyDayRecord> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Consecutive completed days counted back from the most recent day.
    pub fn current_streak(&self) -> u32 {
        super::current_streak_length(self)
    }

    /// Mark the latest day completed. `None` hours keeps any stored value.
    pub(crate) fn mark_latest(&mut self, hours: Option<f64>) {
        let last = self.days.len() - 1;
        let day = &mut self.days[last];
        day.completed = true;
        if let Some(h) = hours {
            day.study_hours = Some(h);
        }
    }

    /// Align stored records with `today`.
    ///
    /// A well-formed window ending today is kept as-is. Anything else is
    /// rebuilt over `today - 6 ..= today`, carrying over the stored record
    /// for each date still in range and filling the rest as incomplete.
    /// Carried records lose hours they could not legally hold.
    pub(crate) fn reconcile(
        stored: Vec<StudyDayRecord>,
        today: NaiveDate,
    ) -> (Self, Reconciliation) {
        let Some(last) = stored.last().map(|d| d.date) else {
            return (Self::fresh(today), Reconciliation::Fresh);
        };

        let well_formed = validate(&stored).is_ok();
        if last == today && well_formed {
            return (Self { days: stored }, Reconciliation::Unchanged);
        }

        let outcome = if last < today && well_formed {
            Reconciliation::Advanced {
                days: (today - last).num_days(),
            }
        } else {
            Reconciliation::Rebuilt
        };

        (Self::rebuild(stored, today), outcome)
    }

    fn rebuild(stored: Vec<StudyDayRecord>, today: NaiveDate) -> Self {
        // Later duplicates win, matching a whole-array overwrite.
        let mut by_date: BTreeMap<NaiveDate, StudyDayRecord> =
            stored.into_iter().map(|d| (d.date, d)).collect();

        let days = window_dates(today)
            .map(|date| match by_date.remove(&date) {
                Some(mut day) => {
                    if check_hours(&day).is_err() {
                        day.study_hours = None;
                    }
                    day
                }
                None => StudyDayRecord::incomplete(date),
            })
            .collect();
        Self { days }
    }
}

impl TryFrom<Vec<StudyDayRecord>> for StreakWindow {
    type Error = WindowError;

    fn try_from(days: Vec<StudyDayRecord>) -> Result<Self, Self::Error> {
        Self::from_records(days)
    }
}

impl From<StreakWindow> for Vec<StudyDayRecord> {
    fn from(window: StreakWindow) -> Self {
        window.days
    }
}

impl<'a> IntoIterator for &'a StreakWindow {
    type Item = &'a StudyDayRecord;
    type IntoIter = std::slice::Iter<'a, StudyDayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// Dates `today - 6 ..= today`, ascending.
fn window_dates(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let span = WINDOW_DAYS as i64 - 1;
    (0..WINDOW_DAYS as i64).map(move |i| today - Duration::days(span - i))
}

fn validate(days: &[StudyDayRecord]) -> Result<(), WindowError> {
    if days.len() != WINDOW_DAYS {
        return Err(WindowError::WrongLength {
            expected: WINDOW_DAYS,
            actual: days.len(),
        });
    }
    for pair in days.windows(2) {
        if pair[1].date != pair[0].date + Duration::days(1) {
            return Err(WindowError::Gap {
                previous: pair[0].date,
                next: pair[1].date,
            });
        }
    }
    days.iter().try_for_each(check_hours)
}

fn check_hours(day: &StudyDayRecord) -> Result<(), WindowError> {
    match day.study_hours {
        Some(h) if !day.completed || !h.is_finite() || h < 0.0 => {
            Err(WindowError::InvalidHours { date: day.date })
        }
        _ => Ok(()),
    }
}
