//! Task model.
//!
//! A task is a unit of work the planner places into a single contiguous
//! block on the calendar. Schedule fields are owned by the planner; the
//! caller persists whatever a run returns.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::TimeWindow;
use crate::error::PlannerError;

/// Task urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Ordering weight (higher = placed first).
    pub fn weight(self) -> u8 {
        match self {
            Priority::Urgent => 4,
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl FromStr for Priority {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(PlannerError::InvalidPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        };
        f.write_str(name)
    }
}

/// A task to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, stable identifier.
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Instant by which the work must be finished.
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    /// Estimated work in minutes. Must be positive.
    pub estimated_duration: u32,
    #[serde(default)]
    pub completed: bool,
    /// Placed start. Set together with `scheduled_end`.
    #[serde(default)]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_end: Option<DateTime<Utc>>,
    /// Lower bound on `scheduled_start`.
    #[serde(default)]
    pub can_start_from: Option<DateTime<Utc>>,
    /// Reserved. Not enforced; only `bufferBetweenTasks` separates tasks.
    #[serde(default)]
    pub buffer_before: Option<u32>,
    /// Reserved. Not enforced; only `bufferBetweenTasks` separates tasks.
    #[serde(default)]
    pub buffer_after: Option<u32>,
    /// Accepted but unsupported: tasks are always placed as one block.
    #[serde(default)]
    pub allow_splitting: bool,
    /// Accepted but unsupported, see `allow_splitting`.
    #[serde(default)]
    pub split_duration: Option<u32>,
    #[serde(default)]
    pub project_id: Option<String>,
    /// Ids of tasks that must finish before this one starts.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Task {
    /// Creates an unscheduled medium-priority 60-minute task.
    pub fn new(id: impl Into<String>, deadline: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            deadline,
            priority: Priority::Medium,
            estimated_duration: 60,
            completed: false,
            scheduled_start: None,
            scheduled_end: None,
            can_start_from: None,
            buffer_before: None,
            buffer_after: None,
            allow_splitting: false,
            split_duration: None,
            project_id: None,
            dependencies: Vec::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the estimated duration (minutes).
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration = minutes;
        self
    }

    /// Sets the estimated duration, rejecting zero.
    pub fn try_with_duration(self, minutes: u32) -> Result<Self, PlannerError> {
        if minutes == 0 {
            return Err(PlannerError::InvalidDuration { task_id: self.id });
        }
        Ok(self.with_duration(minutes))
    }

    /// Sets the earliest allowed start.
    pub fn with_can_start_from(mut self, t: DateTime<Utc>) -> Self {
        self.can_start_from = Some(t);
        self
    }

    /// Places the task at `start` for its estimated duration.
    pub fn with_schedule(mut self, start: DateTime<Utc>) -> Self {
        self.scheduled_start = Some(start);
        self.scheduled_end = Some(start + self.duration());
        self
    }

    /// Marks the task completed.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Assigns the task to a project.
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Adds a dependency.
    pub fn with_dependency(mut self, task_id: impl Into<String>) -> Self {
        self.dependencies.push(task_id.into());
        self
    }

    /// Estimated duration as a chrono duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.estimated_duration))
    }

    /// Whether the task holds a placement.
    pub fn is_scheduled(&self) -> bool {
        self.scheduled_start.is_some()
    }

    /// The placed interval. A missing end defaults to start + duration.
    pub fn scheduled_window(&self) -> Option<TimeWindow> {
        let start = self.scheduled_start?;
        let end = self.scheduled_end.unwrap_or(start + self.duration());
        Some(TimeWindow::new(start, end))
    }

    /// Whether `now` falls inside the placed interval.
    pub fn is_in_progress(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_window().is_some_and(|w| w.contains(now))
    }

    /// Whether the deadline has passed on unfinished work.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.deadline < now
    }

    /// Clears both schedule fields.
    pub fn clear_schedule(&mut self) {
        self.scheduled_start = None;
        self.scheduled_end = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, h, m, 0).unwrap()
    }

    #[test]
    fn test_task_builder() {
        let task = Task::new("T1", at(17, 0))
            .with_title("Write report")
            .with_priority(Priority::High)
            .with_duration(90)
            .with_project("P1")
            .with_dependency("T0");

        assert_eq!(task.id, "T1");
        assert_eq!(task.title, "Write report");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.duration(), Duration::minutes(90));
        assert_eq!(task.project_id.as_deref(), Some("P1"));
        assert_eq!(task.dependencies, vec!["T0".to_string()]);
        assert!(!task.is_scheduled());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = Task::new("T1", at(17, 0)).try_with_duration(0).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidDuration { .. }));
        assert!(Task::new("T1", at(17, 0)).try_with_duration(30).is_ok());
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("Urgent".parse::<Priority>().unwrap(), Priority::Urgent);
        assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::Low);
        assert!("critical".parse::<Priority>().is_err());
        assert!(Priority::Urgent.weight() > Priority::High.weight());
        assert!(Priority::Medium.weight() > Priority::Low.weight());
    }

    #[test]
    fn test_in_progress() {
        let task = Task::new("T1", at(17, 0)).with_duration(60).with_schedule(at(9, 0));
        assert!(task.is_in_progress(at(9, 0)));
        assert!(task.is_in_progress(at(9, 59)));
        assert!(!task.is_in_progress(at(10, 0)));
        assert!(!task.is_in_progress(at(8, 59)));
    }

    #[test]
    fn test_in_progress_end_defaults_to_duration() {
        let mut task = Task::new("T1", at(17, 0)).with_duration(30);
        task.scheduled_start = Some(at(9, 0));
        assert_eq!(task.scheduled_window().unwrap().end, at(9, 30));
        assert!(task.is_in_progress(at(9, 15)));
    }

    #[test]
    fn test_overdue() {
        let task = Task::new("T1", at(9, 0));
        assert!(task.is_overdue(at(10, 0)));
        assert!(!task.clone().with_completed(true).is_overdue(at(10, 0)));
        assert!(!task.is_overdue(at(8, 0)));
    }

    #[test]
    fn test_serde_camel_case() {
        let json = r#"{
            "id": "T1",
            "deadline": "2024-06-03T17:00:00Z",
            "priority": "urgent",
            "estimatedDuration": 45,
            "canStartFrom": "2024-06-03T10:00:00Z",
            "allowSplitting": true
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.estimated_duration, 45);
        assert_eq!(task.can_start_from, Some(at(10, 0)));
        assert!(task.allow_splitting);
        assert!(task.dependencies.is_empty());
    }
}
