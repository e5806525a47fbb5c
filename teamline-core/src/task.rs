//! Normalized task model shared by every view surface.
//!
//! Values of these types come out of `normalize` and are trusted from there
//! on: the tolerance policy for malformed upstream data lives at the
//! normalization boundary, not here.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    #[serde(alias = "not-started")]
    NotStarted,
    #[serde(alias = "in-progress")]
    InProgress,
    Completed,
    #[serde(alias = "on-hold")]
    OnHold,
}

impl Status {
    /// Tolerant parse covering the canonical camelCase spellings plus the
    /// legacy kebab forms still present in older documents.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "notStarted" | "not-started" => Some(Status::NotStarted),
            "inProgress" | "in-progress" => Some(Status::InProgress),
            "completed" => Some(Status::Completed),
            "onHold" | "on-hold" => Some(Status::OnHold),
            _ => None,
        }
    }

    /// Presentation label. Pure lookup, no logic.
    pub fn label(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::OnHold => "On Hold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Fixed sort rank: low=1, medium=2, high=3.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }
}

/// One schedulable work item.
///
/// The engine never mutates a `Task` in place; layout, filtering and
/// classification are functions from task sets to derived data, and edits go
/// through `edit::apply_edit` which returns a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Start instant in the client's single consistent zone.
    pub start: NaiveDateTime,

    /// Whole days occupied, inclusive of the start day: a task covers
    /// `[start_day, start_day + duration_days - 1]`.
    pub duration_days: i64,

    pub status: Status,
    pub priority: Priority,

    /// 0-100.
    pub progress: u8,

    /// Principals responsible for the task; deduplicated, order preserved.
    #[serde(default)]
    pub assignees: Vec<String>,

    // Provenance/display metadata, opaque to the engine.
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, start: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            start,
            duration_days: 1,
            status: Status::NotStarted,
            priority: Priority::Medium,
            progress: 0,
            assignees: vec![],
            team_id: None,
            team_name: None,
            color: None,
        }
    }

    pub fn with_duration(mut self, days: i64) -> Self {
        self.duration_days = days;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_assignee(mut self, principal: impl Into<String>) -> Self {
        self.assignees.push(principal.into());
        self
    }

    pub fn with_team(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.team_id = Some(id.into());
        self.team_name = Some(name.into());
        self
    }

    /// Calendar day the task starts on (time-of-day dropped).
    pub fn start_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn is_assignee(&self, principal: &str) -> bool {
        self.assignees.iter().any(|a| a == principal)
    }
}
