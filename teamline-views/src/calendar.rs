//! Month/week/day calendar grid.
//!
//! The grid is rows of day cells over the computed window. Cells carry the
//! full ordered task list for their day; capping to "+N more" is a display
//! choice, so the builder exposes a `hidden_count` helper instead of
//! truncating.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use teamline_core::layout::tasks_on_day;
use teamline_core::task::Task;
use teamline_core::window::{compute_window, TimeScale, ViewConfig, ViewWindow};

/// Chips shown per cell before the overflow affordance kicks in.
pub const DEFAULT_CELL_CAP: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the padding days around a month grid.
    pub in_month: bool,
    pub is_today: bool,
    pub tasks: Vec<Task>,
}

impl DayCell {
    /// How many tasks a cell capped at `cap` chips would hide.
    pub fn hidden_count(&self, cap: usize) -> usize {
        self.tasks.len().saturating_sub(cap)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGrid {
    pub window: ViewWindow,
    pub weeks: Vec<CalendarWeek>,
}

impl CalendarGrid {
    /// Build the grid for `config`. Month windows chunk into 7-day rows;
    /// a week window is one row and a day window a single-cell row.
    pub fn build(tasks: &[Task], config: &ViewConfig, now: NaiveDateTime) -> Self {
        let window = compute_window(config);
        let today = now.date();

        let mut weeks: Vec<CalendarWeek> = Vec::new();
        let mut row: Vec<DayCell> = Vec::new();
        for date in window.days() {
            let in_month = match config.time_scale {
                TimeScale::Month => {
                    date.month() == config.reference_date.month()
                        && date.year() == config.reference_date.year()
                }
                TimeScale::Day | TimeScale::Week => true,
            };
            row.push(DayCell {
                date,
                in_month,
                is_today: date == today,
                tasks: tasks_on_day(tasks, date),
            });
            if row.len() == 7 {
                weeks.push(CalendarWeek {
                    days: std::mem::take(&mut row),
                });
            }
        }
        if !row.is_empty() {
            weeks.push(CalendarWeek { days: row });
        }

        debug!(weeks = weeks.len(), "calendar grid built");
        Self { window, weeks }
    }
}
