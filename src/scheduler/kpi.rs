//! Schedule quality metrics (KPIs).
//!
//! Summarizes a planner outcome for display to the user.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Scheduled | Tasks holding a placement |
//! | Unplaced | Incomplete tasks without a placement |
//! | Makespan | Latest scheduled end |
//! | Total Tardiness | Sum of max(0, end - deadline) in minutes |
//! | Maximum Tardiness | Largest single delay in minutes |
//! | On-Time Rate | Fraction of placed tasks ending by their deadline |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use chrono::{DateTime, Utc};

use crate::models::ScheduleOutcome;

/// Outcome performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    pub scheduled: usize,
    pub unplaced: usize,
    /// Latest scheduled end, if anything is placed.
    pub makespan: Option<DateTime<Utc>>,
    pub total_tardiness_minutes: i64,
    pub max_tardiness_minutes: i64,
    /// Fraction of placed, incomplete tasks ending on time (0.0..1.0).
    pub on_time_rate: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from an outcome. Completed tasks count only
    /// toward `scheduled` and `makespan`.
    pub fn calculate(outcome: &ScheduleOutcome) -> Self {
        let mut makespan: Option<DateTime<Utc>> = None;
        let mut total_tardiness = 0i64;
        let mut max_tardiness = 0i64;
        let mut on_time = 0usize;
        let mut counted = 0usize;

        for task in &outcome.tasks {
            let Some(window) = task.scheduled_window() else {
                continue;
            };
            makespan = Some(makespan.map_or(window.end, |m| m.max(window.end)));
            if task.completed {
                continue;
            }

            counted += 1;
            let late = (window.end - task.deadline).num_minutes();
            if late > 0 {
                total_tardiness += late;
                max_tardiness = max_tardiness.max(late);
            } else {
                on_time += 1;
            }
        }

        let on_time_rate = if counted == 0 {
            1.0
        } else {
            on_time as f64 / counted as f64
        };

        Self {
            scheduled: outcome.scheduled_count(),
            unplaced: outcome.unplaced_ids().len(),
            makespan,
            total_tardiness_minutes: total_tardiness,
            max_tardiness_minutes: max_tardiness,
            on_time_rate,
        }
    }

    /// Whether every incomplete task is placed and on time.
    pub fn is_clean(&self) -> bool {
        self.unplaced == 0 && self.max_tardiness_minutes == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, h, m, 0).unwrap()
    }

    #[test]
    fn test_kpi_basic() {
        let outcome = ScheduleOutcome {
            tasks: vec![
                Task::new("on-time", at(12, 0)).with_duration(60).with_schedule(at(9, 0)),
                Task::new("late", at(10, 0)).with_duration(60).with_schedule(at(10, 30)),
                Task::new("unplaced", at(12, 0)),
            ],
            diagnostics: Vec::new(),
        };
        let kpi = ScheduleKpi::calculate(&outcome);
        assert_eq!(kpi.scheduled, 2);
        assert_eq!(kpi.unplaced, 1);
        assert_eq!(kpi.makespan, Some(at(11, 30)));
        assert_eq!(kpi.total_tardiness_minutes, 90);
        assert_eq!(kpi.max_tardiness_minutes, 90);
        assert!((kpi.on_time_rate - 0.5).abs() < 1e-10);
        assert!(!kpi.is_clean());
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&ScheduleOutcome::default());
        assert_eq!(kpi.scheduled, 0);
        assert_eq!(kpi.makespan, None);
        assert!((kpi.on_time_rate - 1.0).abs() < 1e-10);
        assert!(kpi.is_clean());
    }

    #[test]
    fn test_completed_not_counted_as_late() {
        let outcome = ScheduleOutcome {
            tasks: vec![Task::new("done", at(9, 0))
                .with_duration(60)
                .with_schedule(at(10, 0))
                .with_completed(true)],
            diagnostics: Vec::new(),
        };
        let kpi = ScheduleKpi::calculate(&outcome);
        assert_eq!(kpi.total_tardiness_minutes, 0);
        assert_eq!(kpi.makespan, Some(at(11, 0)));
    }
}
