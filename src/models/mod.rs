//! Planner domain models.
//!
//! Provides the data types the planner consumes and produces.
//!
//! # Domain Mappings
//!
//! | auto-planner | Role |
//! |--------------|------|
//! | Task | Movable work, placed by the planner |
//! | Event | Immovable block (meeting, appointment) |
//! | Project | Time bounds shared by member tasks |
//! | WorkCalendar | Daily working windows |
//! | ScheduleOutcome | Updated tasks + diagnostics |

mod calendar;
mod event;
mod project;
mod schedule;
mod task;

pub use calendar::{free_slots, TimeWindow, WorkCalendar};
pub use event::Event;
pub use project::Project;
pub use schedule::{Diagnostic, DiagnosticKind, ScheduleOutcome};
pub use task::{Priority, Task};
