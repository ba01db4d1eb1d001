//! Input validation for planner runs.
//!
//! Checks structural integrity of tasks, events, and projects before
//! they reach the planner. The planner itself tolerates all of these
//! defects; validation is for the boundary where data is created.
//! Detects:
//! - Duplicate IDs
//! - Zero durations and half-set or inverted schedules
//! - Unknown dependency and project references
//! - Circular dependencies (DAG validation)
//! - Inverted event and project windows
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};

use crate::models::{Event, Project, Task};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// Estimated duration is zero.
    InvalidDuration,
    /// Only one of the schedule fields is set, or end <= start.
    InvalidSchedule,
    /// A task depends on itself.
    SelfDependency,
    /// A dependency references a task that doesn't exist.
    UnknownDependency,
    /// A task references a project that doesn't exist.
    UnknownProject,
    /// Dependency graph contains a cycle.
    CyclicDependency,
    /// A timed event ends at or before it starts.
    InvalidEventRange,
    /// A project starts after its deadline.
    InvalidProjectRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates planner input.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(tasks: &[Task], events: &[Event], projects: &[Project]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut project_ids = HashSet::new();
    for p in projects {
        if !project_ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate project ID: {}", p.id),
            ));
        }
        if p.start_date > p.deadline {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProjectRange,
                format!("Project '{}' starts after its deadline", p.id),
            ));
        }
    }

    let mut event_ids = HashSet::new();
    for e in events {
        if !event_ids.insert(e.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate event ID: {}", e.id),
            ));
        }
        if !e.all_day && e.end_date <= e.start_date {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidEventRange,
                format!("Event '{}' ends at or before it starts", e.id),
            ));
        }
    }

    let mut task_ids = HashSet::new();
    for t in tasks {
        if !task_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", t.id),
            ));
        }
        if t.estimated_duration == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("Task '{}' has a zero estimated duration", t.id),
            ));
        }
        match (t.scheduled_start, t.scheduled_end) {
            (Some(s), Some(e)) if e <= s => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSchedule,
                format!("Task '{}' is scheduled to end at or before it starts", t.id),
            )),
            (Some(_), None) | (None, Some(_)) => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSchedule,
                format!("Task '{}' has only one schedule field set", t.id),
            )),
            _ => {}
        }
        if let Some(pid) = &t.project_id {
            if !project_ids.contains(pid.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownProject,
                    format!("Task '{}' references unknown project '{}'", t.id, pid),
                ));
            }
        }
    }

    for t in tasks {
        for dep in &t.dependencies {
            if dep == &t.id {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfDependency,
                    format!("Task '{}' depends on itself", t.id),
                ));
            } else if !task_ids.contains(dep.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownDependency,
                    format!("Task '{}' references unknown dependency '{}'", t.id, dep),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(tasks) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the dependency graph using DFS.
///
/// Self-dependencies are reported separately and skipped here.
fn detect_cycles(tasks: &[Task]) -> Option<ValidationError> {
    // task_id → dependencies
    let adj: HashMap<&str, Vec<&str>> = tasks
        .iter()
        .map(|t| {
            let deps = t
                .dependencies
                .iter()
                .map(String::as_str)
                .filter(|d| *d != t.id)
                .collect();
            (t.id.as_str(), deps)
        })
        .collect();

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    // Input order keeps the reported task deterministic.
    for t in tasks {
        let node = t.id.as_str();
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving task '{node}'"),
            ));
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(node) {
        for &next in neighbors {
            if in_stack.contains(next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}
