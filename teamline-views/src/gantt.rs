//! Gantt surface: task-derived window, lane-assigned bars, month header
//! spans and the today marker, plus a drag controller bound to the view.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use teamline_core::drag::DragController;
use teamline_core::layout::{layout, LayoutEntry};
use teamline_core::task::Task;
use teamline_core::window::{data_range_window, ViewWindow};

/// One month's stretch of day columns in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSegment {
    pub first_day: NaiveDate,
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttView {
    pub window: ViewWindow,
    pub months: Vec<MonthSegment>,
    pub entries: Vec<LayoutEntry>,
    /// Day column of the today marker; absent when today falls outside
    /// the task-derived window.
    pub today_offset: Option<i64>,
}

impl GanttView {
    pub fn build(tasks: &[Task], today: NaiveDate) -> Self {
        let window = data_range_window(tasks, today);
        let entries = layout(tasks, &window);
        let months = month_segments(&window);
        let today_offset = window
            .contains(today)
            .then(|| (today - window.start).num_days());

        debug!(
            entries = entries.len(),
            months = months.len(),
            "gantt view built"
        );
        Self {
            window,
            months,
            entries,
            today_offset,
        }
    }

    /// Drag controller bound to this view's window and day metric.
    pub fn drag_controller(&self, day_width: f64) -> DragController {
        DragController::new(self.window, day_width)
    }
}

fn month_segments(window: &ViewWindow) -> Vec<MonthSegment> {
    let mut segments: Vec<MonthSegment> = Vec::new();
    for date in window.days() {
        match segments.last_mut() {
            Some(segment)
                if segment.first_day.month() == date.month()
                    && segment.first_day.year() == date.year() =>
            {
                segment.days += 1;
            }
            _ => segments.push(MonthSegment {
                first_day: date,
                days: 1,
            }),
        }
    }
    segments
}
