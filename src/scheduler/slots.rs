//! Greedy earliest-fit slot search.
//!
//! # Algorithm
//! For each calendar day from `earliest` to `horizon`:
//! 1. Skip the day if it is a weekend and weekends are disallowed.
//! 2. Clip the day's working window to `[earliest, horizon)`.
//! 3. Subtract blocked intervals: events extended on their trailing edge
//!    by the buffer, placed tasks extended on both edges.
//! 4. Take the first free slot at least as long as the task.
//!
//! Placements are never revisited: a task placed earlier in the run
//! keeps its slot.
//!
//! # Complexity
//! O(d * b log b) per task where d = days scanned, b = blocked intervals.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::models::{free_slots, TimeWindow, WorkCalendar};

/// Intervals a run must not place work into.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    events: Vec<TimeWindow>,
    tasks: Vec<TimeWindow>,
}

impl Occupancy {
    /// Creates an occupancy map from event windows.
    pub fn new(events: impl IntoIterator<Item = TimeWindow>) -> Self {
        Self {
            events: events.into_iter().collect(),
            tasks: Vec::new(),
        }
    }

    /// Records a placed or fixed task.
    pub fn add_task(&mut self, window: TimeWindow) {
        self.tasks.push(window);
    }

    /// Event windows (unbuffered).
    pub fn events(&self) -> &[TimeWindow] {
        &self.events
    }

    /// Task windows (unbuffered).
    pub fn tasks(&self) -> &[TimeWindow] {
        &self.tasks
    }

    fn blocked(&self, buffer: Duration) -> Vec<TimeWindow> {
        let events = self
            .events
            .iter()
            .map(|e| TimeWindow::new(e.start, e.end + buffer));
        let tasks = self
            .tasks
            .iter()
            .map(|t| TimeWindow::new(t.start - buffer, t.end + buffer));
        events.chain(tasks).collect()
    }
}

/// Finds the first free slot for a task.
#[derive(Debug, Clone)]
pub struct SlotFinder<'a> {
    calendar: &'a WorkCalendar,
    buffer: Duration,
    max_tasks_per_day: Option<u32>,
}

impl<'a> SlotFinder<'a> {
    /// Creates a slot finder.
    pub fn new(calendar: &'a WorkCalendar, buffer_minutes: u32) -> Self {
        Self {
            calendar,
            buffer: Duration::minutes(i64::from(buffer_minutes)),
            max_tasks_per_day: None,
        }
    }

    /// Sets the soft per-day cap.
    pub fn with_max_tasks_per_day(mut self, cap: Option<u32>) -> Self {
        self.max_tasks_per_day = cap;
        self
    }

    /// Finds the earliest `duration`-long slot starting at or after
    /// `earliest` and ending no later than `horizon`.
    ///
    /// With a per-day cap, days at the cap are tried only when no
    /// other day fits.
    pub fn find(
        &self,
        duration: Duration,
        earliest: DateTime<Utc>,
        horizon: DateTime<Utc>,
        occupancy: &Occupancy,
    ) -> Option<TimeWindow> {
        match earliest.checked_add_signed(duration) {
            Some(end) if end <= horizon => {}
            _ => return None,
        }
        let blocked = occupancy.blocked(self.buffer);

        if let Some(cap) = self.max_tasks_per_day {
            let under_cap = |date: NaiveDate| self.tasks_on(date, occupancy) < cap as usize;
            if let Some(slot) = self.scan(duration, earliest, horizon, occupancy, &blocked, under_cap) {
                return Some(slot);
            }
        }
        self.scan(duration, earliest, horizon, occupancy, &blocked, |_| true)
    }

    fn scan(
        &self,
        duration: Duration,
        earliest: DateTime<Utc>,
        horizon: DateTime<Utc>,
        occupancy: &Occupancy,
        blocked: &[TimeWindow],
        day_allowed: impl Fn(NaiveDate) -> bool,
    ) -> Option<TimeWindow> {
        let bounds = TimeWindow::new(earliest, horizon);
        let last = self.calendar.local_date(horizon);
        let mut date = self.calendar.local_date(earliest);

        while date <= last {
            if day_allowed(date) {
                let range = self
                    .calendar
                    .working_window(date)
                    .and_then(|w| w.clip(&bounds));
                if let Some(range) = range {
                    for slot in free_slots(range, blocked) {
                        if slot.duration() < duration {
                            continue;
                        }
                        let candidate = TimeWindow::new(slot.start, slot.start + duration);
                        // Re-check against raw events before accepting.
                        if occupancy.events().iter().any(|e| e.overlaps(&candidate)) {
                            continue;
                        }
                        return Some(candidate);
                    }
                }
            }
            date = date.succ_opt()?;
        }
        None
    }

    fn tasks_on(&self, date: NaiveDate, occupancy: &Occupancy) -> usize {
        occupancy
            .tasks()
            .iter()
            .filter(|t| self.calendar.local_date(t.start) == date)
            .count()
    }
}
