//! Drag-to-reschedule state machine for the interactive timeline.
//!
//! The controller converts pointer pixels into whole-day moves against a
//! fixed window and day width. It holds no authoritative task data: ending
//! a drag yields a [`ProposedReschedule`] for the caller to persist, after
//! which the caller re-runs layout with whatever the store confirmed.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::edit::{can_reschedule, EditContext};
use crate::layout::LayoutEntry;
use crate::window::ViewWindow;

/// Where the controller is in a drag cycle. `Committing` and `Cancelled`
/// are resting phases; the next `begin_drag` starts a fresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragPhase {
    Idle,
    Dragging,
    Committing,
    Cancelled,
}

/// Live drag bookkeeping; exists only while a drag is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragState {
    pub task_id: String,
    pub origin_px: f64,
    pub origin_day_offset: i64,
    pub current_day_offset: i64,
    pub proposed_start: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStart {
    Started,
    /// The principal is not an assignee, or another drag is active.
    Denied,
}

/// Handed to the persistence collaborator when a drag ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedReschedule {
    pub task_id: String,
    pub proposed_start: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct DragController {
    window: ViewWindow,
    day_width: f64,
    phase: DragPhase,
    state: Option<DragState>,
}

impl DragController {
    /// `day_width` is the pixel width of one day column. A zero width (a
    /// surface measured before first paint) never panics; drags just keep
    /// tracking their origin day until the width is real.
    pub fn new(window: ViewWindow, day_width: f64) -> Self {
        Self {
            window,
            day_width,
            phase: DragPhase::Idle,
            state: None,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// Start dragging `entry` from `pointer_px`. Denied when the principal
    /// is not an assignee of the task, or when a drag is already active;
    /// either way the controller is left untouched.
    pub fn begin_drag(
        &mut self,
        entry: &LayoutEntry,
        pointer_px: f64,
        ctx: &EditContext,
    ) -> DragStart {
        if self.phase == DragPhase::Dragging {
            debug!(task = %entry.task.id, "drag ignored while another is active");
            return DragStart::Denied;
        }
        if !can_reschedule(&entry.task, ctx) {
            debug!(task = %entry.task.id, principal = %ctx.principal, "drag denied");
            return DragStart::Denied;
        }

        self.state = Some(DragState {
            task_id: entry.task.id.clone(),
            origin_px: pointer_px,
            origin_day_offset: entry.day_offset,
            current_day_offset: entry.day_offset,
            proposed_start: self.window.start + Duration::days(entry.day_offset),
        });
        self.phase = DragPhase::Dragging;
        debug!(task = %entry.task.id, origin_day = entry.day_offset, "drag started");
        DragStart::Started
    }

    /// Track the pointer, snapping to the nearest whole day. A no-op
    /// outside an active drag; a delta with no usable day equivalent
    /// (zero day width, offset past any representable date) keeps the
    /// last position.
    pub fn update_drag(&mut self, pointer_px: f64) {
        if self.phase != DragPhase::Dragging {
            return;
        }
        let window_start = self.window.start;
        let day_width = self.day_width;
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let dragged = (pointer_px - state.origin_px) / day_width;
        if !dragged.is_finite() {
            trace!(task = %state.task_id, "drag update ignored, pointer delta has no day equivalent");
            return;
        }
        let dragged_days = dragged.round() as i64;
        let offset = state.origin_day_offset.saturating_add(dragged_days);
        let Some(proposed) = Duration::try_days(offset)
            .and_then(|days| window_start.checked_add_signed(days))
        else {
            trace!(task = %state.task_id, dragged_days, "drag update ignored, offset out of date range");
            return;
        };
        state.current_day_offset = offset;
        state.proposed_start = proposed;
        trace!(task = %state.task_id, dragged_days, "drag updated");
    }

    /// Finish the drag and hand back the proposal. A drag that never moved
    /// still commits, with the task's original start day.
    pub fn end_drag(&mut self) -> Option<ProposedReschedule> {
        if self.phase != DragPhase::Dragging {
            return None;
        }
        let state = self.state.take()?;
        self.phase = DragPhase::Committing;
        debug!(task = %state.task_id, proposed = %state.proposed_start, "drag committed");
        Some(ProposedReschedule {
            task_id: state.task_id,
            proposed_start: state.proposed_start,
        })
    }

    /// Discard the drag without proposing anything. Idempotent; a no-op
    /// outside an active drag.
    pub fn cancel_drag(&mut self) {
        if self.phase != DragPhase::Dragging {
            return;
        }
        self.state = None;
        self.phase = DragPhase::Cancelled;
        debug!("drag cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::TeamRole;
    use crate::layout::layout;
    use crate::task::Task;
    use chrono::NaiveDate;

    fn march_window() -> ViewWindow {
        ViewWindow {
            start: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 3, 28).unwrap(),
        }
    }

    fn entry() -> LayoutEntry {
        let start = NaiveDate::from_ymd_opt(2026, 3, 3)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let tasks = vec![Task::new("t1", "draft", start)
            .with_duration(2)
            .with_assignee("dana")];
        layout(&tasks, &march_window()).remove(0)
    }

    fn assignee() -> EditContext {
        EditContext::new("dana", TeamRole::Member)
    }

    #[test]
    fn non_assignee_cannot_start_a_drag() {
        let mut controller = DragController::new(march_window(), 50.0);
        let outsider = EditContext::new("lee", TeamRole::Admin);

        assert_eq!(
            controller.begin_drag(&entry(), 200.0, &outsider),
            DragStart::Denied
        );
        assert_eq!(controller.phase(), DragPhase::Idle);
        assert!(controller.state().is_none());
    }

    #[test]
    fn drag_snaps_to_the_nearest_whole_day() {
        let mut controller = DragController::new(march_window(), 50.0);
        controller.begin_drag(&entry(), 200.0, &assignee());

        // 74px right of the origin is 1.48 days: one day, not two.
        controller.update_drag(274.0);
        let state = controller.state().unwrap();
        assert_eq!(state.current_day_offset, 3);
        assert_eq!(
            state.proposed_start,
            NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
        );
    }

    #[test]
    fn snapping_rounds_rather_than_truncates() {
        let mut controller = DragController::new(march_window(), 50.0);
        controller.begin_drag(&entry(), 200.0, &assignee());

        controller.update_drag(224.0); // 0.48 days
        assert_eq!(controller.state().unwrap().current_day_offset, 2);

        controller.update_drag(226.0); // 0.52 days
        assert_eq!(controller.state().unwrap().current_day_offset, 3);
    }

    #[test]
    fn leftward_drags_go_to_earlier_days() {
        let mut controller = DragController::new(march_window(), 50.0);
        controller.begin_drag(&entry(), 200.0, &assignee());

        controller.update_drag(126.0); // -1.48 days
        let state = controller.state().unwrap();
        assert_eq!(state.current_day_offset, 1);
        assert_eq!(
            state.proposed_start,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
    }

    #[test]
    fn zero_day_width_keeps_the_drag_at_its_origin() {
        let mut controller = DragController::new(march_window(), 0.0);
        assert_eq!(
            controller.begin_drag(&entry(), 200.0, &assignee()),
            DragStart::Started
        );

        controller.update_drag(200.0); // 0 / 0 pointer delta
        controller.update_drag(488.0);
        let state = controller.state().unwrap();
        assert_eq!(state.current_day_offset, 2);
        assert_eq!(
            state.proposed_start,
            NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()
        );

        let proposal = controller.end_drag().unwrap();
        assert_eq!(
            proposal.proposed_start,
            NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()
        );
    }

    #[test]
    fn offsets_past_any_date_are_ignored() {
        let mut controller = DragController::new(march_window(), 50.0);
        controller.begin_drag(&entry(), 200.0, &assignee());

        controller.update_drag(1e300);
        assert_eq!(controller.state().unwrap().current_day_offset, 2);

        // Tracking resumes once the pointer reads sanely again.
        controller.update_drag(274.0);
        assert_eq!(controller.state().unwrap().current_day_offset, 3);
    }

    #[test]
    fn update_outside_a_drag_is_a_noop() {
        let mut controller = DragController::new(march_window(), 50.0);
        controller.update_drag(500.0);
        assert_eq!(controller.phase(), DragPhase::Idle);
        assert!(controller.state().is_none());
    }

    #[test]
    fn ending_without_movement_commits_the_original_day() {
        let mut controller = DragController::new(march_window(), 50.0);
        controller.begin_drag(&entry(), 200.0, &assignee());

        let proposal = controller.end_drag().unwrap();
        assert_eq!(proposal.task_id, "t1");
        assert_eq!(
            proposal.proposed_start,
            NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()
        );
        assert_eq!(controller.phase(), DragPhase::Committing);
        assert!(controller.state().is_none());
        assert!(controller.end_drag().is_none());
    }

    #[test]
    fn cancel_discards_state_and_is_idempotent() {
        let mut controller = DragController::new(march_window(), 50.0);
        controller.begin_drag(&entry(), 200.0, &assignee());
        controller.update_drag(350.0);

        controller.cancel_drag();
        assert_eq!(controller.phase(), DragPhase::Cancelled);
        assert!(controller.state().is_none());
        assert!(controller.end_drag().is_none());

        controller.cancel_drag();
        assert_eq!(controller.phase(), DragPhase::Cancelled);

        let mut idle = DragController::new(march_window(), 50.0);
        idle.cancel_drag();
        assert_eq!(idle.phase(), DragPhase::Idle);
    }

    #[test]
    fn only_one_drag_at_a_time() {
        let mut controller = DragController::new(march_window(), 50.0);
        assert_eq!(
            controller.begin_drag(&entry(), 200.0, &assignee()),
            DragStart::Started
        );
        assert_eq!(
            controller.begin_drag(&entry(), 300.0, &assignee()),
            DragStart::Denied
        );
        // The original drag is still live and tracking.
        controller.update_drag(274.0);
        assert_eq!(controller.state().unwrap().current_day_offset, 3);
    }

    #[test]
    fn a_new_drag_can_begin_after_commit_or_cancel() {
        let mut controller = DragController::new(march_window(), 50.0);
        controller.begin_drag(&entry(), 200.0, &assignee());
        controller.end_drag();
        assert_eq!(
            controller.begin_drag(&entry(), 100.0, &assignee()),
            DragStart::Started
        );

        controller.cancel_drag();
        assert_eq!(
            controller.begin_drag(&entry(), 100.0, &assignee()),
            DragStart::Started
        );
    }
}
