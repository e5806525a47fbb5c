//! Due-date derivation and urgency classification.
//!
//! A task occupies `duration_days` whole days starting on its start day,
//! so the due date is the last occupied day: `start_day + (duration - 1)`.
//! Zero and negative durations still occupy their start day.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::task::{Status, Task};

/// Last day a task occupies. Duration is clamped to at least one day so a
/// zero-duration task is due on its start day.
pub fn due_date(task: &Task) -> NaiveDate {
    task.start_day() + Duration::days(task.duration_days.max(1) - 1)
}

/// A task is overdue once its due date has passed, unless it is completed.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    due_date(task) < today && task.status != Status::Completed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DueClass {
    Overdue,
    DueToday,
    Upcoming,
}

/// Bucket a task for the timeline's urgency grouping. Completed tasks with
/// past due dates land in `Upcoming` rather than `Overdue`.
pub fn classify(task: &Task, today: NaiveDate) -> DueClass {
    let due = due_date(task);
    if due < today && task.status != Status::Completed {
        DueClass::Overdue
    } else if due == today {
        DueClass::DueToday
    } else {
        DueClass::Upcoming
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task_on(day: u32, duration: i64) -> Task {
        let start = NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        Task::new("t1", "review", start).with_duration(duration)
    }

    #[test]
    fn one_day_task_is_due_on_its_start_day() {
        assert_eq!(
            due_date(&task_on(10, 1)),
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
        );
    }

    #[test]
    fn due_date_spans_the_duration() {
        assert_eq!(
            due_date(&task_on(10, 5)),
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
        );
    }

    #[test]
    fn zero_duration_still_occupies_the_start_day() {
        assert_eq!(
            due_date(&task_on(10, 0)),
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
        );
    }

    #[test]
    fn overdue_requires_a_past_due_date_and_an_open_status() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();

        assert!(is_overdue(&task_on(10, 1), today));
        assert!(!is_overdue(&task_on(12, 1), today));
        assert!(!is_overdue(
            &task_on(10, 1).with_status(Status::Completed),
            today
        ));
    }

    #[test]
    fn classify_buckets_by_due_date() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();

        assert_eq!(classify(&task_on(10, 1), today), DueClass::Overdue);
        assert_eq!(classify(&task_on(12, 1), today), DueClass::DueToday);
        assert_eq!(classify(&task_on(13, 1), today), DueClass::Upcoming);
        // Spanning tasks are judged by their last day.
        assert_eq!(classify(&task_on(10, 3), today), DueClass::DueToday);
    }

    #[test]
    fn completed_tasks_never_classify_as_overdue() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();
        let done = task_on(10, 1).with_status(Status::Completed);
        assert_eq!(classify(&done, today), DueClass::Upcoming);
    }

    #[test]
    fn due_class_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&DueClass::DueToday).unwrap(),
            "\"dueToday\""
        );
    }
}
