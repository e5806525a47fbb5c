//! Filter and sort pipeline shared by every surface.
//!
//! Filters are conjunctive; an unset field means "all". Sorting is stable,
//! so ties keep their input order and descending only flips the comparator,
//! never the tie order. Applying the same pipeline twice yields the same
//! sequence.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::classify::{due_date, is_overdue};
use crate::task::{Priority, Status, Task};

/// Days ahead (inclusive) covered by [`DueWindow::ThisWeek`].
const THIS_WEEK_SPAN_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DueWindow {
    Overdue,
    Today,
    ThisWeek,
}

/// Which tasks to keep. `None` in any field keeps everything for that
/// dimension, matching the surfaces' "all" dropdown option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub due: Option<DueWindow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    DueDate,
    Priority,
    Progress,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::DueDate,
            direction: SortDirection::Asc,
        }
    }
}

fn due_matches(task: &Task, window: DueWindow, today: NaiveDate) -> bool {
    match window {
        DueWindow::Overdue => is_overdue(task, today),
        DueWindow::Today => due_date(task) == today,
        DueWindow::ThisWeek => {
            let due = due_date(task);
            today <= due && due <= today + Duration::days(THIS_WEEK_SPAN_DAYS)
        }
    }
}

fn matches(task: &Task, filter: &FilterSpec, today: NaiveDate) -> bool {
    let status_ok = filter.status.is_none_or(|want| task.status == want);
    let priority_ok = filter.priority.is_none_or(|want| task.priority == want);
    let assignee_ok = filter
        .assignee
        .as_deref()
        .is_none_or(|who| task.is_assignee(who));
    let due_ok = filter.due.is_none_or(|window| due_matches(task, window, today));

    let ok = status_ok && priority_ok && assignee_ok && due_ok;
    trace!(id = %task.id, status_ok, priority_ok, assignee_ok, due_ok, "filter predicate evaluation");
    ok
}

fn compare(a: &Task, b: &Task, field: SortField) -> Ordering {
    match field {
        SortField::DueDate => due_date(a).cmp(&due_date(b)),
        SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortField::Progress => a.progress.cmp(&b.progress),
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

/// Filter then stably sort `tasks`. `now` anchors the due-window predicates
/// to a calendar day.
pub fn apply(
    tasks: &[Task],
    filter: &FilterSpec,
    sort: &SortSpec,
    now: NaiveDateTime,
) -> Vec<Task> {
    let today = now.date();
    let mut kept: Vec<Task> = tasks
        .iter()
        .filter(|task| matches(task, filter, today))
        .cloned()
        .collect();

    kept.sort_by(|a, b| {
        let ordering = compare(a, b, sort.field);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    debug!(total = tasks.len(), kept = kept.len(), "pipeline applied");
    kept
}
