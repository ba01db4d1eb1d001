//! Automatic task scheduler for a personal planner.
//!
//! Given tasks (deadlines, priorities, durations, dependencies, project
//! windows) and immovable events, assigns each task a concrete start and
//! end inside working hours. Completed and in-progress work is never
//! moved. The planner is a pure function of its inputs and the current
//! time: persistence, UI and accounts live with the caller.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Event`, `Project`, `TimeWindow`,
//!   `WorkCalendar`, `ScheduleOutcome`, `Diagnostic`
//! - **`scheduler`**: The planning pipeline and its entry points
//! - **`options`**: `SchedulingOptions` (working hours, buffer, weekends)
//! - **`validation`**: Input integrity checks (duplicate IDs, cycles, bad ranges)
//!
//! # Example
//!
//! ```
//! use auto_planner::{schedule_tasks_automatically, SchedulingOptions};
//! use auto_planner::models::{Priority, Task};
//! use chrono::{Duration, Utc};
//!
//! let tasks = vec![
//!     Task::new("draft", Utc::now() + Duration::days(7)).with_priority(Priority::High),
//!     Task::new("review", Utc::now() + Duration::days(7)).with_dependency("draft"),
//! ];
//! let outcome = schedule_tasks_automatically(&tasks, &[], None, &[]).unwrap();
//! let draft = outcome.task("draft").unwrap();
//! let review = outcome.task("review").unwrap();
//! assert!(draft.scheduled_end.unwrap() < review.scheduled_start.unwrap());
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod error;
pub mod models;
pub mod options;
pub mod scheduler;
pub mod validation;

pub use error::PlannerError;
pub use options::{SchedulingOptions, WorkingHours};
pub use scheduler::{reschedule_after_event_change, schedule_tasks_automatically, Planner, ScheduleKpi};
