//! teamline-core: Layout and rescheduling engine for the Teamline task views

pub mod classify;
pub mod drag;
pub mod edit;
pub mod layout;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod task;
pub mod window;

pub use classify::{classify, due_date, is_overdue, DueClass};
pub use drag::{DragController, DragPhase, DragStart, DragState, ProposedReschedule};
pub use edit::{
    apply_edit, can_reschedule, can_restructure, EditContext, EditField, EditOutcome, TaskPatch,
    TeamRole,
};
pub use layout::{apply_proposed_start, layout, tasks_on_day, LayoutEntry};
pub use normalize::{normalize_all, normalize_instant, normalize_task, parse_instant};
pub use pipeline::{DueWindow, FilterSpec, SortDirection, SortField, SortSpec};
pub use record::{RawTask, RawTimestamp};
pub use task::{Priority, Status, Task};
pub use window::{compute_window, data_range_window, week_start, TimeScale, ViewConfig, ViewWindow};
