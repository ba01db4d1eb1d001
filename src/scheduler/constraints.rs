//! Project-bound constraint resolution.
//!
//! Derives a task's effective deadline and earliest start from its own
//! fields and its project's window. Out-of-range values are clamped,
//! never rejected.

use chrono::{DateTime, Utc};

use crate::models::{Project, Task};

/// How a task's project reference resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectMatch {
    /// The task has no project.
    None,
    /// The project exists and its bounds were applied.
    Found,
    /// The referenced project is missing; own values kept.
    Missing(String),
}

/// Effective time bounds of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBounds {
    pub deadline: DateTime<Utc>,
    pub can_start_from: Option<DateTime<Utc>>,
    pub project: ProjectMatch,
}

/// Resolves a task's bounds against its project.
///
/// - `deadline` is clamped into `[project.start_date, project.deadline]`.
/// - `can_start_from` is raised to `project.start_date` (or set to it
///   when absent); it is never lowered.
pub fn resolve(task: &Task, projects: &[Project]) -> TaskBounds {
    let Some(project_id) = task.project_id.as_deref() else {
        return TaskBounds {
            deadline: task.deadline,
            can_start_from: task.can_start_from,
            project: ProjectMatch::None,
        };
    };

    let Some(project) = projects.iter().find(|p| p.id == project_id) else {
        return TaskBounds {
            deadline: task.deadline,
            can_start_from: task.can_start_from,
            project: ProjectMatch::Missing(project_id.to_string()),
        };
    };

    // min then max: an inverted project window yields its start date
    // instead of panicking like Ord::clamp.
    let deadline = task.deadline.min(project.deadline).max(project.start_date);
    let can_start_from = task
        .can_start_from
        .map_or(project.start_date, |t| t.max(project.start_date));

    TaskBounds {
        deadline,
        can_start_from: Some(can_start_from),
        project: ProjectMatch::Found,
    }
}
