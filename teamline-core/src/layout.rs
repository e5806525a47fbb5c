//! Day-granular bar layout shared by the timeline and Gantt surfaces.
//!
//! The engine emits offsets and spans in whole days relative to a window
//! start. Pixel positions are derived on demand via `left_px`/`width_px`
//! so the core never depends on a rendering metric.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::task::Task;
use crate::window::ViewWindow;

/// One positioned task bar. `day_offset` is relative to the window start
/// and may be negative for tasks that begin before the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEntry {
    pub task: Task,
    pub day_offset: i64,
    pub span_days: i64,
    pub lane: usize,
    pub visible: bool,
}

impl LayoutEntry {
    pub fn left_px(&self, day_width: f64) -> f64 {
        self.day_offset as f64 * day_width
    }

    pub fn width_px(&self, day_width: f64) -> f64 {
        self.span_days as f64 * day_width
    }

    /// Whether two bars occupy any day in common.
    pub fn overlaps(&self, other: &LayoutEntry) -> bool {
        self.day_offset < other.day_offset + other.span_days
            && other.day_offset < self.day_offset + self.span_days
    }
}

fn entry_visible(day_offset: i64, span_days: i64, window: &ViewWindow) -> bool {
    day_offset + span_days > 0 && day_offset < window.len_days()
}

/// Position every task against `window`.
///
/// Entries come back ordered by `(day_offset, id)`. Lanes are assigned
/// greedily in that order: each bar takes the lowest-numbered lane whose
/// bars it does not overlap, so bars sharing a lane never collide.
pub fn layout(tasks: &[Task], window: &ViewWindow) -> Vec<LayoutEntry> {
    let mut entries: Vec<LayoutEntry> = tasks
        .iter()
        .map(|task| {
            let day_offset = (task.start_day() - window.start).num_days();
            let span_days = task.duration_days.max(1);
            LayoutEntry {
                task: task.clone(),
                day_offset,
                span_days,
                lane: 0,
                visible: entry_visible(day_offset, span_days, window),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        a.day_offset
            .cmp(&b.day_offset)
            .then_with(|| a.task.id.cmp(&b.task.id))
    });

    // Entries arrive in start order, so per lane only the furthest end
    // matters when testing for a free slot.
    let mut lane_ends: Vec<i64> = Vec::new();
    for entry in &mut entries {
        let end = entry.day_offset + entry.span_days;
        entry.lane = match lane_ends.iter().position(|&lane_end| lane_end <= entry.day_offset) {
            Some(lane) => {
                lane_ends[lane] = end;
                lane
            }
            None => {
                lane_ends.push(end);
                lane_ends.len() - 1
            }
        };
    }

    entries
}

/// Tasks whose occupied day interval contains `date`, time of day ignored,
/// ordered by `(start, id)`.
pub fn tasks_on_day(tasks: &[Task], date: NaiveDate) -> Vec<Task> {
    let mut on_day: Vec<Task> = tasks
        .iter()
        .filter(|task| {
            let first = task.start_day();
            let last = first + Duration::days(task.duration_days.max(1) - 1);
            first <= date && date <= last
        })
        .cloned()
        .collect();
    on_day.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    on_day
}

/// Optimistically move one bar to a proposed start day after a drag commit.
///
/// Shifts the entry's offset and start date (keeping its time of day) and
/// recomputes visibility. Lanes are left as assigned; callers re-run
/// `layout` once the commit settles or rolls back. Returns false when no
/// entry matches `task_id`.
pub fn apply_proposed_start(
    entries: &mut [LayoutEntry],
    task_id: &str,
    proposed_start: NaiveDate,
    window: &ViewWindow,
) -> bool {
    match entries.iter_mut().find(|e| e.task.id == task_id) {
        Some(entry) => {
            entry.day_offset = (proposed_start - window.start).num_days();
            entry.task.start = proposed_start.and_time(entry.task.start.time());
            entry.visible = entry_visible(entry.day_offset, entry.span_days, window);
            true
        }
        None => false,
    }
}
