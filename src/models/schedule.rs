//! Schedule outcome model.
//!
//! A planner run returns the full task list with schedule fields filled
//! in or cleared, plus structured diagnostics describing every defect the
//! run worked around: unplaceable tasks, cycles, conflicts.

use serde::{Deserialize, Serialize};

use super::Task;

/// Result of one planner run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// All input tasks, in input order, with updated schedule fields.
    pub tasks: Vec<Task>,
    /// Problems detected during the run.
    pub diagnostics: Vec<Diagnostic>,
}

/// A problem the planner detected and worked around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Type of problem.
    pub kind: DiagnosticKind,
    /// Task the problem concerns.
    pub task_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of planner diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// No slot found before the horizon; schedule fields left unset.
    Unplaced,
    /// A dependency edge closes a cycle and was ignored.
    CycleDetected,
    /// A dependency id does not match any task.
    UnknownDependency,
    /// The project id does not match any project.
    UnknownProject,
    /// An existing placement had already started; it was re-slotted.
    TimeTravel,
    /// An existing placement overlapped an event; it was re-slotted after it.
    EventConflict,
    /// An existing placement was re-slotted because a dependency moved.
    DependencyRequeued,
    /// Not placed because a dependency could not be placed.
    BlockedByDependency,
    /// An overdue task was placed after its deadline.
    PlacedAfterDeadline,
}

impl Diagnostic {
    /// Creates a diagnostic.
    pub fn new(kind: DiagnosticKind, task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            task_id: task_id.into(),
            message: message.into(),
        }
    }
}

impl ScheduleOutcome {
    /// Finds a task by id.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Diagnostics of one kind.
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.kind == kind).collect()
    }

    /// Whether any diagnostic of `kind` concerns `task_id`.
    pub fn has_diagnostic(&self, task_id: &str, kind: DiagnosticKind) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == kind && d.task_id == task_id)
    }

    /// Ids of incomplete tasks left without a placement.
    pub fn unplaced_ids(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|t| !t.completed && !t.is_scheduled())
            .map(|t| t.id.as_str())
            .collect()
    }

    /// Number of tasks holding a placement.
    pub fn scheduled_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_scheduled()).count()
    }
}
