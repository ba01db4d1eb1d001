//! Conflict reconciliation for existing placements.
//!
//! Only used in scheduling mode. A placement made by an earlier run is
//! kept unless it has slipped into the past or now overlaps an event.

use chrono::{DateTime, Duration, Utc};

use crate::models::{Task, TimeWindow};

/// What to do with a schedulable task before the slot search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No placement yet; goes to the slot search.
    Unscheduled,
    /// Existing placement is still valid.
    Keep,
    /// Placement starts in the past; re-slot from now.
    TimeTravel,
    /// Placement overlaps events; re-slot no earlier than `not_before`.
    EventConflict { not_before: DateTime<Utc> },
}

/// Checks a non-protected task's existing placement.
///
/// `events` are blocking windows (all-day events excluded). When several
/// events overlap, the re-slot floor follows the one ending last.
pub fn reconcile(task: &Task, events: &[TimeWindow], now: DateTime<Utc>, buffer: Duration) -> Verdict {
    let Some(window) = task.scheduled_window() else {
        return Verdict::Unscheduled;
    };

    if window.start < now {
        return Verdict::TimeTravel;
    }

    let conflict_end = events
        .iter()
        .filter(|e| e.overlaps(&window))
        .map(|e| e.end)
        .max();

    match conflict_end {
        Some(end) => Verdict::EventConflict {
            not_before: end + buffer,
        },
        None => Verdict::Keep,
    }
}
