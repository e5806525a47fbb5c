//! Permission rule and edit application.
//!
//! Fields split into two categories with different rules. Scheduling
//! fields (start, status, progress) follow the assignment: only a current
//! assignee may change them, whatever their role. Structural fields
//! (title, description, priority, duration, assignee list) also accept
//! team admins and managers. A combined edit that crosses a permission
//! line is partially accepted, never wholly rejected.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::dedup_keep_order;
use crate::task::{Priority, Status, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    Admin,
    Manager,
    Member,
}

/// Who is editing, resolved by the caller before the edit reaches the
/// engine. The engine never looks principals up anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditContext {
    pub principal: String,
    pub role: TeamRole,
}

impl EditContext {
    pub fn new(principal: impl Into<String>, role: TeamRole) -> Self {
        Self {
            principal: principal.into(),
            role,
        }
    }
}

/// Requested field changes. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub duration_days: Option<i64>,
    pub assignees: Option<Vec<String>>,
    pub start: Option<NaiveDateTime>,
    pub status: Option<Status>,
    pub progress: Option<u8>,
}

impl TaskPatch {
    pub fn touches_structural(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.priority.is_some()
            || self.duration_days.is_some()
            || self.assignees.is_some()
    }

    pub fn touches_scheduling(&self) -> bool {
        self.start.is_some() || self.status.is_some() || self.progress.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditField {
    Title,
    Description,
    Priority,
    Duration,
    Assignees,
    Start,
    Status,
    Progress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditOutcome {
    /// Every touched field was permitted and applied.
    Applied(Task),
    /// The permitted category applied; the rest reverted to stored values.
    Partial { task: Task, reverted: Vec<EditField> },
    /// No touched field was permitted; the task is unchanged.
    Denied,
}

/// Scheduling changes ride the assignment, not the role.
pub fn can_reschedule(task: &Task, ctx: &EditContext) -> bool {
    task.is_assignee(&ctx.principal)
}

pub fn can_restructure(task: &Task, ctx: &EditContext) -> bool {
    matches!(ctx.role, TeamRole::Admin | TeamRole::Manager) || task.is_assignee(&ctx.principal)
}

/// Apply `patch` under the permission rule, returning a new task value.
///
/// Each touched category is checked independently. When only one category
/// clears its check the edit goes through partially and the reverted field
/// names are reported so callers can tell the editor what was kept.
pub fn apply_edit(task: &Task, patch: &TaskPatch, ctx: &EditContext) -> EditOutcome {
    let wants_scheduling = patch.touches_scheduling();
    let wants_structural = patch.touches_structural();
    if !wants_scheduling && !wants_structural {
        return EditOutcome::Applied(task.clone());
    }

    let apply_scheduling = wants_scheduling && can_reschedule(task, ctx);
    let apply_structural = wants_structural && can_restructure(task, ctx);

    if !apply_scheduling && !apply_structural {
        debug!(task = %task.id, principal = %ctx.principal, "edit denied");
        return EditOutcome::Denied;
    }

    let mut next = task.clone();
    let mut reverted: Vec<EditField> = Vec::new();

    if apply_structural {
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(description) = &patch.description {
            next.description = description.clone();
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }
        if let Some(duration) = patch.duration_days {
            // Same tolerance as ingest: a negative duration means one day.
            next.duration_days = if duration < 0 { 1 } else { duration };
        }
        if let Some(assignees) = &patch.assignees {
            next.assignees = dedup_keep_order(assignees);
        }
    } else if wants_structural {
        push_structural_fields(patch, &mut reverted);
    }

    if apply_scheduling {
        if let Some(start) = patch.start {
            next.start = start;
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(progress) = patch.progress {
            next.progress = progress.min(100);
        }
    } else if wants_scheduling {
        push_scheduling_fields(patch, &mut reverted);
    }

    if reverted.is_empty() {
        EditOutcome::Applied(next)
    } else {
        debug!(
            task = %task.id,
            principal = %ctx.principal,
            reverted = ?reverted,
            "edit partially accepted"
        );
        EditOutcome::Partial { task: next, reverted }
    }
}

fn push_structural_fields(patch: &TaskPatch, out: &mut Vec<EditField>) {
    if patch.title.is_some() {
        out.push(EditField::Title);
    }
    if patch.description.is_some() {
        out.push(EditField::Description);
    }
    if patch.priority.is_some() {
        out.push(EditField::Priority);
    }
    if patch.duration_days.is_some() {
        out.push(EditField::Duration);
    }
    if patch.assignees.is_some() {
        out.push(EditField::Assignees);
    }
}

fn push_scheduling_fields(patch: &TaskPatch, out: &mut Vec<EditField>) {
    if patch.start.is_some() {
        out.push(EditField::Start);
    }
    if patch.status.is_some() {
        out.push(EditField::Status);
    }
    if patch.progress.is_some() {
        out.push(EditField::Progress);
    }
}
