//! Fixed calendar events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// An immovable calendar block (meeting, appointment).
///
/// All-day events never block timed slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
}

impl Event {
    /// Creates a timed event.
    pub fn new(id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            start_date: start,
            end_date: end,
            all_day: false,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Marks the event as all-day.
    pub fn all_day(mut self) -> Self {
        self.all_day = true;
        self
    }

    /// Interval this event blocks, or `None` for all-day and empty events.
    pub fn blocking_window(&self) -> Option<TimeWindow> {
        (!self.all_day && self.end_date > self.start_date)
            .then(|| TimeWindow::new(self.start_date, self.end_date))
    }
}
