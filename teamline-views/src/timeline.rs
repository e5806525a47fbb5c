//! Timeline surface: filtered, sorted task rows with positioned bars.
//!
//! Rows keep the pipeline's sort order, not the layout engine's internal
//! ordering, and only tasks whose bars intersect the window become rows.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use teamline_core::classify::{classify, due_date, DueClass};
use teamline_core::layout::{layout, LayoutEntry};
use teamline_core::pipeline::{self, FilterSpec, SortSpec};
use teamline_core::task::Task;
use teamline_core::window::{compute_window, ViewConfig, ViewWindow};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineRow {
    pub entry: LayoutEntry,
    pub due_date: NaiveDate,
    pub due_class: DueClass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineView {
    pub window: ViewWindow,
    pub rows: Vec<TimelineRow>,
}

impl TimelineView {
    pub fn build(
        tasks: &[Task],
        filter: &FilterSpec,
        sort: &SortSpec,
        config: &ViewConfig,
        now: NaiveDateTime,
    ) -> Self {
        let window = compute_window(config);
        let today = now.date();
        let kept = pipeline::apply(tasks, filter, sort, now);

        let mut entries: HashMap<String, LayoutEntry> = layout(&kept, &window)
            .into_iter()
            .map(|entry| (entry.task.id.clone(), entry))
            .collect();

        let rows: Vec<TimelineRow> = kept
            .iter()
            .filter_map(|task| entries.remove(&task.id))
            .filter(|entry| entry.visible)
            .map(|entry| TimelineRow {
                due_date: due_date(&entry.task),
                due_class: classify(&entry.task, today),
                entry,
            })
            .collect();

        debug!(rows = rows.len(), "timeline view built");
        Self { window, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use teamline_core::pipeline::{SortDirection, SortField};
    use teamline_core::task::Status;
    use teamline_core::window::TimeScale;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 12)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn month_config() -> ViewConfig {
        ViewConfig {
            time_scale: TimeScale::Month,
            reference_date: NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
        }
    }

    fn task_on(id: &str, day: u32) -> Task {
        Task::new(
            id,
            id,
            NaiveDate::from_ymd_opt(2026, 3, day)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn rows_follow_the_requested_sort_order() {
        let tasks = vec![task_on("late", 20), task_on("early", 5), task_on("mid", 12)];
        let sort = SortSpec {
            field: SortField::DueDate,
            direction: SortDirection::Desc,
        };

        let view = TimelineView::build(&tasks, &FilterSpec::default(), &sort, &month_config(), now());
        let ids: Vec<&str> = view.rows.iter().map(|r| r.entry.task.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "mid", "early"]);
    }

    #[test]
    fn rows_outside_the_window_are_dropped() {
        // The March 2026 month window runs March 1 through April 4.
        let tasks = vec![
            task_on("inside", 10),
            Task::new(
                "outside",
                "outside",
                NaiveDate::from_ymd_opt(2026, 6, 1)
                    .unwrap()
                    .and_hms_opt(10, 0, 0)
                    .unwrap(),
            ),
        ];

        let view = TimelineView::build(
            &tasks,
            &FilterSpec::default(),
            &SortSpec::default(),
            &month_config(),
            now(),
        );
        let ids: Vec<&str> = view.rows.iter().map(|r| r.entry.task.id.as_str()).collect();
        assert_eq!(ids, vec!["inside"]);
    }

    #[test]
    fn rows_carry_due_classification() {
        let tasks = vec![
            task_on("overdue", 10),
            task_on("today", 12),
            task_on("upcoming", 20),
            task_on("finished", 9).with_status(Status::Completed),
        ];

        let view = TimelineView::build(
            &tasks,
            &FilterSpec::default(),
            &SortSpec::default(),
            &month_config(),
            now(),
        );
        let class_of = |id: &str| {
            view.rows
                .iter()
                .find(|r| r.entry.task.id == id)
                .unwrap()
                .due_class
        };

        assert_eq!(class_of("overdue"), DueClass::Overdue);
        assert_eq!(class_of("today"), DueClass::DueToday);
        assert_eq!(class_of("upcoming"), DueClass::Upcoming);
        assert_eq!(class_of("finished"), DueClass::Upcoming);
    }

    #[test]
    fn filters_narrow_the_rows() {
        let tasks = vec![
            task_on("open", 12),
            task_on("done", 12).with_status(Status::Completed),
        ];
        let filter = FilterSpec {
            status: Some(Status::Completed),
            ..FilterSpec::default()
        };

        let view = TimelineView::build(&tasks, &filter, &SortSpec::default(), &month_config(), now());
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].entry.task.id, "done");
    }
}
