//! Automatic task scheduling.
//!
//! Places tasks into working hours around fixed events, in priority and
//! dependency order, without touching completed or in-progress work.
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Project bounds | `constraints` |
//! | Protected tasks | `protection` |
//! | Stale placements | `reconcile` (scheduling mode only) |
//! | Order | `ordering` |
//! | Placement | `slots` |
//!
//! # Algorithm
//!
//! Greedy earliest-fit. It never backtracks: a task placed earlier in the
//! run keeps its slot even if a later task would fit better there.
//!
//! # Concurrency
//!
//! A run is synchronous and shares no state with other runs. Callers
//! must serialize runs over the same user's data themselves.

mod constraints;
mod engine;
mod kpi;
mod ordering;
mod protection;
mod reconcile;
mod slots;

pub use constraints::{resolve, ProjectMatch, TaskBounds};
pub use engine::{Mode, Planner};
pub use kpi::ScheduleKpi;
pub use ordering::{priority_cmp, sort_by_priority, topo_sort, DependencyEdge, TopoOrder};
pub use protection::{classify, is_protected, Partition};
pub use reconcile::{reconcile, Verdict};
pub use slots::{Occupancy, SlotFinder};

use crate::error::Result;
use crate::models::{Event, Project, ScheduleOutcome, Task};
use crate::options::SchedulingOptions;

/// Places unscheduled, stale, and conflicting tasks at the current time.
///
/// Valid existing placements are preserved. `None` options use the
/// defaults (09:00-18:00, 15 minute buffer, no weekends).
pub fn schedule_tasks_automatically(
    tasks: &[Task],
    events: &[Event],
    options: Option<&SchedulingOptions>,
    projects: &[Project],
) -> Result<ScheduleOutcome> {
    let planner = Planner::new(options.cloned().unwrap_or_default())?;
    Ok(planner.schedule(tasks, events, projects))
}

/// Re-places every task that is neither completed nor in progress.
pub fn reschedule_after_event_change(
    tasks: &[Task],
    events: &[Event],
    options: Option<&SchedulingOptions>,
    projects: &[Project],
) -> Result<ScheduleOutcome> {
    let planner = Planner::new(options.cloned().unwrap_or_default())?;
    Ok(planner.reschedule(tasks, events, projects))
}
