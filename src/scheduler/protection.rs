//! Protection classification.
//!
//! Completed work and work currently underway are never altered by a
//! run, in either mode.

use chrono::{DateTime, Utc};

use crate::models::Task;

/// Task indices split by whether a run may touch them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub protected: Vec<usize>,
    pub schedulable: Vec<usize>,
}

impl Partition {
    /// Whether the task at `idx` is protected.
    pub fn is_protected(&self, idx: usize) -> bool {
        self.protected.binary_search(&idx).is_ok()
    }
}

/// Whether a task is completed or in progress at `now`.
pub fn is_protected(task: &Task, now: DateTime<Utc>) -> bool {
    task.completed || task.is_in_progress(now)
}

/// Partitions task indices into protected and schedulable, in input order.
pub fn classify(tasks: &[Task], now: DateTime<Utc>) -> Partition {
    let (protected, schedulable) = (0..tasks.len()).partition(|&i| is_protected(&tasks[i], now));
    Partition {
        protected,
        schedulable,
    }
}
