//! View window calculation for the calendar, timeline and Gantt surfaces.
//!
//! Weeks start on Sunday throughout. The source views disagreed on this
//! (some assumed Monday); the engine standardizes Sunday-start so every
//! surface shares one grid.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Buffer added on both sides of a task-derived window (Gantt mode).
const DATA_RANGE_BUFFER_DAYS: i64 = 14;
/// Padding around the current month when no tasks constrain the range.
const EMPTY_RANGE_PAD_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeScale {
    Day,
    Week,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    pub time_scale: TimeScale,
    pub reference_date: NaiveDate,
}

/// Inclusive, whole-day date range shown by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ViewWindow {
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.len_days()).map(move |i| self.start + Duration::days(i))
    }
}

/// Compute the window for a scale + reference date.
///
/// Day: the reference date alone. Week: Sunday on or before the reference,
/// spanning 7 days. Month: the reference month's calendar grid, padded back
/// to Sunday and forward to Saturday so the result is whole 7-day rows.
pub fn compute_window(config: &ViewConfig) -> ViewWindow {
    match config.time_scale {
        TimeScale::Day => ViewWindow {
            start: config.reference_date,
            end: config.reference_date,
        },
        TimeScale::Week => {
            let start = week_start(config.reference_date);
            ViewWindow {
                start,
                end: start + Duration::days(6),
            }
        }
        TimeScale::Month => {
            let (first, last) = month_bounds(config.reference_date);
            ViewWindow {
                start: week_start(first),
                end: week_end(last),
            }
        }
    }
}

/// Task-derived window for the Gantt surface: min start minus a buffer to
/// max end (`start + duration`) plus a buffer. An empty task set falls back
/// to the current month padded by a week on each side.
pub fn data_range_window(tasks: &[Task], today: NaiveDate) -> ViewWindow {
    let starts = tasks.iter().map(Task::start_day);
    let ends = tasks
        .iter()
        .map(|t| t.start_day() + Duration::days(t.duration_days));

    match (starts.min(), ends.max()) {
        (Some(min_start), Some(max_end)) => ViewWindow {
            start: min_start - Duration::days(DATA_RANGE_BUFFER_DAYS),
            end: max_end + Duration::days(DATA_RANGE_BUFFER_DAYS),
        },
        _ => {
            let (first, last) = month_bounds(today);
            ViewWindow {
                start: first - Duration::days(EMPTY_RANGE_PAD_DAYS),
                end: last + Duration::days(EMPTY_RANGE_PAD_DAYS),
            }
        }
    }
}

/// Most recent Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Following Saturday on or after `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    date + Duration::days(6 - date.weekday().num_days_from_sunday() as i64)
}

fn month_bounds(reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = reference.with_day(1).unwrap_or(reference);
    let (next_year, next_month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|d| d - Duration::days(1))
        .unwrap_or(first);
    (first, last)
}
