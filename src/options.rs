//! Scheduling options.
//!
//! Passed explicitly into every planner run; the engine keeps no
//! process-wide settings. Field names serialize in camelCase so the
//! host application can hand the same JSON it stores, or load a TOML file.
//!
//! ```toml
//! bufferBetweenTasks = 10
//! allowWeekends = true
//!
//! [workingHours]
//! start = "08:30"
//! end = "17:00"
//! ```

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Longest accepted planning horizon, in days.
pub const MAX_PLANNING_HORIZON_DAYS: u32 = 3650;

/// Daily work window as `HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

impl WorkingHours {
    /// Creates a working-hours window.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parses both ends into times of day.
    pub fn bounds(&self) -> Result<(NaiveTime, NaiveTime)> {
        Ok((parse_hhmm(&self.start)?, parse_hhmm(&self.end)?))
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self::new("09:00", "18:00")
    }
}

fn parse_hhmm(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|source| {
        PlannerError::InvalidTimeOfDay {
            value: value.to_string(),
            source,
        }
    })
}

/// Planner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulingOptions {
    /// Daily work window.
    pub working_hours: WorkingHours,
    /// Minutes kept free after every occupied interval.
    pub buffer_between_tasks: u32,
    /// When false, Saturday and Sunday are skipped.
    pub allow_weekends: bool,
    /// Soft cap on tasks per day. Days at the cap are only used when no
    /// other day within the horizon fits.
    pub max_tasks_per_day: Option<u32>,
    /// Horizon, in days from now, for tasks already past their deadline.
    pub planning_horizon_days: u32,
    /// Offset of the user's local time from UTC, in minutes.
    pub utc_offset_minutes: i32,
}

impl Default for SchedulingOptions {
    fn default() -> Self {
        Self {
            working_hours: WorkingHours::default(),
            buffer_between_tasks: 15,
            allow_weekends: false,
            max_tasks_per_day: None,
            planning_horizon_days: 30,
            utc_offset_minutes: 0,
        }
    }
}

impl SchedulingOptions {
    /// Loads options from TOML; missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let options: Self = toml::from_str(s)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks the options are usable for a run.
    pub fn validate(&self) -> Result<()> {
        let (start, end) = self.working_hours.bounds()?;
        if end <= start {
            return Err(PlannerError::InvalidWorkingHours {
                start: self.working_hours.start.clone(),
                end: self.working_hours.end.clone(),
            });
        }
        if !(1..=MAX_PLANNING_HORIZON_DAYS).contains(&self.planning_horizon_days) {
            return Err(PlannerError::InvalidHorizon);
        }
        if self.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(PlannerError::InvalidUtcOffset(self.utc_offset_minutes));
        }
        Ok(())
    }

    /// Sets the working hours.
    pub fn with_working_hours(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.working_hours = WorkingHours::new(start, end);
        self
    }

    /// Sets the inter-task buffer in minutes.
    pub fn with_buffer(mut self, minutes: u32) -> Self {
        self.buffer_between_tasks = minutes;
        self
    }

    /// Allows or forbids weekend placement.
    pub fn with_weekends(mut self, allow: bool) -> Self {
        self.allow_weekends = allow;
        self
    }

    /// Sets the soft per-day task cap.
    pub fn with_max_tasks_per_day(mut self, cap: u32) -> Self {
        self.max_tasks_per_day = Some(cap);
        self
    }

    /// Sets the local UTC offset in minutes.
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }
}
