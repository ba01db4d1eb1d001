//! Calendar and time window models.
//!
//! Turns [`SchedulingOptions`] into concrete daily working windows and
//! subtracts blocked periods from them to produce free slots.
//!
//! # Time Model
//! Instants are UTC. Calendar days (weekday, working hours) are evaluated
//! in the fixed local offset configured on the options.
//!
//! # Precedence
//! Blocked periods override working windows. An instant is free iff:
//! - It falls within the day's working window, AND
//! - It does NOT fall within any blocked period.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::options::SchedulingOptions;

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: DateTime<Utc>,
    /// Interval end (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Length of this window.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether an instant falls within this window.
    #[inline]
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t < self.end
    }

    /// Whether two windows overlap. Touching windows do not.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Intersection of two windows, if non-empty.
    pub fn clip(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (end > start).then_some(Self { start, end })
    }
}

/// Daily working calendar derived from scheduling options.
///
/// # Example
///
/// ```
/// use auto_planner::models::WorkCalendar;
/// use auto_planner::SchedulingOptions;
/// use chrono::NaiveDate;
///
/// let cal = WorkCalendar::from_options(&SchedulingOptions::default()).unwrap();
/// let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let window = cal.working_window(monday).unwrap();
/// assert_eq!(window.duration().num_hours(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct WorkCalendar {
    work_start: NaiveTime,
    work_end: NaiveTime,
    allow_weekends: bool,
    offset: FixedOffset,
}

impl WorkCalendar {
    /// Builds a calendar, rejecting inverted hours and bad offsets.
    pub fn from_options(options: &SchedulingOptions) -> Result<Self> {
        let (work_start, work_end) = options.working_hours.bounds()?;
        if work_end <= work_start {
            return Err(PlannerError::InvalidWorkingHours {
                start: options.working_hours.start.clone(),
                end: options.working_hours.end.clone(),
            });
        }
        let offset = options
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(PlannerError::InvalidUtcOffset(options.utc_offset_minutes))?;

        Ok(Self {
            work_start,
            work_end,
            allow_weekends: options.allow_weekends,
            offset,
        })
    }

    /// Local calendar date of an instant.
    pub fn local_date(&self, t: DateTime<Utc>) -> NaiveDate {
        t.with_timezone(&self.offset).date_naive()
    }

    /// Whether work may be placed on this date at all.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.allow_weekends || !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Working-hours window for a date, or `None` on skipped weekends.
    pub fn working_window(&self, date: NaiveDate) -> Option<TimeWindow> {
        if !self.is_working_day(date) {
            return None;
        }
        let start = self.to_utc(date, self.work_start)?;
        let end = self.to_utc(date, self.work_end)?;
        Some(TimeWindow::new(start, end))
    }

    fn to_utc(&self, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
        self.offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Free slots within `range` after removing `blocked` periods.
///
/// `blocked` need not be sorted or disjoint.
pub fn free_slots(range: TimeWindow, blocked: &[TimeWindow]) -> Vec<TimeWindow> {
    if range.end <= range.start {
        return Vec::new();
    }

    let mut busy: Vec<TimeWindow> = blocked.iter().filter_map(|b| b.clip(&range)).collect();
    busy.sort_unstable_by_key(|b| b.start);

    let mut slots = Vec::new();
    let mut cursor = range.start;
    for b in &busy {
        if b.start > cursor {
            slots.push(TimeWindow::new(cursor, b.start));
        }
        if b.end > cursor {
            cursor = b.end;
        }
    }
    if cursor < range.end {
        slots.push(TimeWindow::new(cursor, range.end));
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::WorkingHours;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, h, m, 0).unwrap()
    }

    #[test]
    fn test_time_window() {
        let w = TimeWindow::new(at(9, 0), at(10, 0));
        assert_eq!(w.duration(), Duration::minutes(60));
        assert!(w.contains(at(9, 0)));
        assert!(w.contains(at(9, 59)));
        assert!(!w.contains(at(10, 0))); // exclusive end
        assert!(!w.contains(at(8, 0)));
    }

    #[test]
    fn test_time_window_overlap() {
        let a = TimeWindow::new(at(9, 0), at(10, 0));
        let b = TimeWindow::new(at(9, 30), at(11, 0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let c = TimeWindow::new(at(10, 0), at(11, 0)); // touching
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_weekend_skipped() {
        let cal = WorkCalendar::from_options(&SchedulingOptions::default()).unwrap();
        let saturday = NaiveDate::from_ymd_opt(2024, 6, 8).unwrap();
        assert!(cal.working_window(saturday).is_none());

        let opts = SchedulingOptions {
            allow_weekends: true,
            ..SchedulingOptions::default()
        };
        let cal = WorkCalendar::from_options(&opts).unwrap();
        assert!(cal.working_window(saturday).is_some());
    }

    #[test]
    fn test_offset_window() {
        let opts = SchedulingOptions {
            utc_offset_minutes: 120,
            ..SchedulingOptions::default()
        };
        let cal = WorkCalendar::from_options(&opts).unwrap();
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let w = cal.working_window(monday).unwrap();
        assert_eq!(w.start, at(7, 0)); // 09:00 at +02:00
        assert_eq!(w.end, at(16, 0));
    }

    #[test]
    fn test_inverted_hours_rejected() {
        let opts = SchedulingOptions {
            working_hours: WorkingHours::new("18:00", "09:00"),
            ..SchedulingOptions::default()
        };
        assert!(matches!(
            WorkCalendar::from_options(&opts),
            Err(PlannerError::InvalidWorkingHours { .. })
        ));
    }

    #[test]
    fn test_free_slots() {
        let range = TimeWindow::new(at(9, 0), at(18, 0));
        let blocked = vec![
            TimeWindow::new(at(13, 0), at(14, 0)),
            TimeWindow::new(at(10, 0), at(11, 15)),
            TimeWindow::new(at(10, 30), at(11, 0)), // nested
        ];
        let slots = free_slots(range, &blocked);
        assert_eq!(
            slots,
            vec![
                TimeWindow::new(at(9, 0), at(10, 0)),
                TimeWindow::new(at(11, 15), at(13, 0)),
                TimeWindow::new(at(14, 0), at(18, 0)),
            ]
        );
    }

    #[test]
    fn test_free_slots_outside_range_ignored() {
        let range = TimeWindow::new(at(9, 0), at(12, 0));
        let blocked = vec![TimeWindow::new(at(6, 0), at(9, 30))];
        let slots = free_slots(range, &blocked);
        assert_eq!(slots, vec![TimeWindow::new(at(9, 30), at(12, 0))]);
    }
}
