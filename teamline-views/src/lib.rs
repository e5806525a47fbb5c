//! teamline-views: Surface adapters over the teamline-core engine
//!
//! Each adapter turns tasks plus view inputs into a serde-ready view
//! model. All scheduling semantics live in teamline-core; nothing here
//! renders or decides policy.

pub mod calendar;
pub mod gantt;
pub mod timeline;

pub use calendar::{CalendarGrid, CalendarWeek, DayCell, DEFAULT_CELL_CAP};
pub use gantt::{GanttView, MonthSegment};
pub use timeline::{TimelineRow, TimelineView};
