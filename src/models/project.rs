//! Project model.
//!
//! A project bounds its member tasks in time: their deadlines are clamped
//! into `[start_date, deadline]` and they cannot start before `start_date`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional container imposing temporal bounds on its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
}

impl Project {
    /// Creates a project spanning `[start, deadline]`.
    pub fn new(id: impl Into<String>, start: DateTime<Utc>, deadline: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            start_date: start,
            deadline,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
