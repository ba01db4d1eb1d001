//! Planner run pipeline.
//!
//! # Algorithm
//!
//! 1. Classify tasks: completed and in-progress tasks are protected.
//! 2. Resolve project bounds on every schedulable task.
//! 3. Decide which tasks need a slot: all of them when rescheduling;
//!    otherwise the unscheduled ones plus existing placements that are in
//!    the past, overlap an event, start before a dependency ends, or
//!    depend on a task being re-slotted.
//! 4. Order the queue by priority, then topologically by dependencies.
//! 5. Place each task at the earliest free slot after `now`, its start
//!    floor and its dependencies' ends (plus buffer).
//!
//! The run is a pure function of its inputs and `now`; inputs are never
//! mutated.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use super::constraints::{resolve, ProjectMatch};
use super::ordering::{sort_by_priority, topo_sort};
use super::protection::classify;
use super::reconcile::{reconcile, Verdict};
use super::slots::{Occupancy, SlotFinder};
use crate::error::Result;
use crate::models::{
    Diagnostic, DiagnosticKind, Event, Project, ScheduleOutcome, Task, TimeWindow, WorkCalendar,
};
use crate::options::SchedulingOptions;

/// Which placements a run may move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Keep valid placements; place new, stale, or conflicting tasks.
    Schedule,
    /// Re-place every task that is neither completed nor in progress.
    Reschedule,
}

/// Automatic task planner.
///
/// # Example
///
/// ```
/// use auto_planner::{Planner, SchedulingOptions};
/// use auto_planner::models::{Event, Priority, Task};
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap();
/// let deadline = Utc.with_ymd_and_hms(2024, 6, 4, 17, 0, 0).unwrap();
/// let tasks = vec![Task::new("A", deadline).with_priority(Priority::Urgent).with_duration(60)];
/// let events = vec![Event::new(
///     "standup",
///     Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2024, 6, 3, 9, 30, 0).unwrap(),
/// )];
///
/// let planner = Planner::new(SchedulingOptions::default()).unwrap().at(now);
/// let outcome = planner.schedule(&tasks, &events, &[]);
///
/// let a = outcome.task("A").unwrap();
/// assert_eq!(a.scheduled_start, Some(Utc.with_ymd_and_hms(2024, 6, 3, 9, 45, 0).unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    options: SchedulingOptions,
    calendar: WorkCalendar,
    now: Option<DateTime<Utc>>,
}

impl Planner {
    /// Creates a planner, validating the options.
    pub fn new(options: SchedulingOptions) -> Result<Self> {
        options.validate()?;
        let calendar = WorkCalendar::from_options(&options)?;
        Ok(Self {
            options,
            calendar,
            now: None,
        })
    }

    /// Fixes the clock. Without it each run reads the wall clock.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// The options this planner runs with.
    pub fn options(&self) -> &SchedulingOptions {
        &self.options
    }

    /// Places unscheduled tasks and repairs stale or conflicting placements.
    ///
    /// Placement is greedy: a task placed earlier in the run never moves
    /// to make room for a later one. Kept placements are checked against
    /// events and dependencies only, so two placements that already
    /// overlap each other in the input are returned as they are. Use
    /// [`Planner::reschedule`] to replan them.
    pub fn schedule(&self, tasks: &[Task], events: &[Event], projects: &[Project]) -> ScheduleOutcome {
        self.run(tasks, events, projects, Mode::Schedule)
    }

    /// Re-places every task that is neither completed nor in progress.
    pub fn reschedule(&self, tasks: &[Task], events: &[Event], projects: &[Project]) -> ScheduleOutcome {
        self.run(tasks, events, projects, Mode::Reschedule)
    }

    /// Runs the full pipeline in the given mode.
    pub fn run(
        &self,
        tasks: &[Task],
        events: &[Event],
        projects: &[Project],
        mode: Mode,
    ) -> ScheduleOutcome {
        let now = self.now.unwrap_or_else(Utc::now);
        let buffer = Duration::minutes(i64::from(self.options.buffer_between_tasks));
        let mut out = tasks.to_vec();
        let mut diagnostics = Vec::new();

        let mut index: HashMap<&str, usize> = HashMap::new();
        for (i, t) in tasks.iter().enumerate() {
            index.entry(t.id.as_str()).or_insert(i);
        }

        let event_windows: Vec<TimeWindow> = events.iter().filter_map(Event::blocking_window).collect();
        let mut occupancy = Occupancy::new(event_windows.iter().copied());

        let partition = classify(tasks, now);
        for &i in &partition.protected {
            if let Some(w) = out[i].scheduled_window() {
                occupancy.add_task(w);
            }
        }

        for &i in &partition.schedulable {
            let bounds = resolve(&out[i], projects);
            if let ProjectMatch::Missing(project_id) = &bounds.project {
                warn!(task = %out[i].id, project = %project_id, "unknown project; using task's own bounds");
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UnknownProject,
                    &out[i].id,
                    format!("project '{project_id}' not found"),
                ));
            }
            out[i].deadline = bounds.deadline;
            out[i].can_start_from = bounds.can_start_from;
        }

        // Extra start floors for re-slotted placements.
        let mut floors: HashMap<usize, DateTime<Utc>> = HashMap::new();
        let mut queue: Vec<usize> = Vec::new();
        let mut kept: Vec<usize> = Vec::new();

        for &i in &partition.schedulable {
            if mode == Mode::Reschedule {
                out[i].clear_schedule();
                queue.push(i);
                continue;
            }
            match reconcile(&out[i], &event_windows, now, buffer) {
                Verdict::Unscheduled => {
                    out[i].clear_schedule();
                    queue.push(i);
                }
                Verdict::Keep => kept.push(i),
                Verdict::TimeTravel => {
                    debug!(task = %out[i].id, "placement is in the past; re-slotting");
                    diagnostics.push(Diagnostic::new(
                        DiagnosticKind::TimeTravel,
                        &out[i].id,
                        "scheduled start has passed",
                    ));
                    out[i].clear_schedule();
                    queue.push(i);
                }
                Verdict::EventConflict { not_before } => {
                    debug!(task = %out[i].id, %not_before, "placement overlaps an event; re-slotting");
                    diagnostics.push(Diagnostic::new(
                        DiagnosticKind::EventConflict,
                        &out[i].id,
                        format!("overlaps an event; moved to start no earlier than {not_before}"),
                    ));
                    out[i].clear_schedule();
                    floors.insert(i, not_before);
                    queue.push(i);
                }
            }
        }

        self.requeue_dependents(&mut out, &index, &mut kept, &mut queue, &mut diagnostics);
        for &i in &kept {
            if let Some(w) = out[i].scheduled_window() {
                occupancy.add_task(w);
            }
        }

        sort_by_priority(&out, &mut queue);
        let topo = topo_sort(&out, &queue, &index);
        for edge in &topo.cycles {
            let id = &out[edge.task].id;
            warn!(task = %id, dependency = %edge.dependency, "dependency cycle; edge ignored");
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::CycleDetected,
                id,
                format!("dependency on '{}' closes a cycle and was ignored", edge.dependency),
            ));
        }
        for edge in &topo.unknown {
            let id = &out[edge.task].id;
            warn!(task = %id, dependency = %edge.dependency, "unknown dependency ignored");
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnknownDependency,
                id,
                format!("dependency '{}' not found", edge.dependency),
            ));
        }
        let ignored = topo.ignored_edges();

        let finder = SlotFinder::new(&self.calendar, self.options.buffer_between_tasks)
            .with_max_tasks_per_day(self.options.max_tasks_per_day);
        let overdue_horizon = now
            .checked_add_signed(Duration::days(i64::from(self.options.planning_horizon_days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        for &i in &topo.order {
            let mut earliest = now;
            if let Some(t) = out[i].can_start_from {
                earliest = earliest.max(t);
            }
            if let Some(&t) = floors.get(&i) {
                earliest = earliest.max(t);
            }

            let mut blocked_by = None;
            for dep in &out[i].dependencies {
                if ignored.contains(&(i, dep.as_str())) {
                    continue;
                }
                let Some(&j) = index.get(dep.as_str()) else {
                    continue;
                };
                if j == i || out[j].completed {
                    continue;
                }
                match out[j].scheduled_window() {
                    Some(w) => earliest = earliest.max(w.end + buffer),
                    None => {
                        blocked_by = Some(dep.clone());
                        break;
                    }
                }
            }
            if let Some(dep) = blocked_by {
                warn!(task = %out[i].id, dependency = %dep, "dependency unplaced; task left unplaced");
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::BlockedByDependency,
                    &out[i].id,
                    format!("waits on '{dep}', which could not be placed"),
                ));
                continue;
            }

            let overdue = out[i].is_overdue(now);
            let horizon = if overdue { overdue_horizon } else { out[i].deadline };

            match finder.find(out[i].duration(), earliest, horizon, &occupancy) {
                Some(slot) => {
                    debug!(task = %out[i].id, start = %slot.start, end = %slot.end, "placed");
                    if overdue {
                        diagnostics.push(Diagnostic::new(
                            DiagnosticKind::PlacedAfterDeadline,
                            &out[i].id,
                            format!("deadline {} has passed; placed at {}", out[i].deadline, slot.start),
                        ));
                    }
                    out[i].scheduled_start = Some(slot.start);
                    out[i].scheduled_end = Some(slot.end);
                    occupancy.add_task(slot);
                }
                None => {
                    warn!(task = %out[i].id, %horizon, "no free slot before horizon");
                    diagnostics.push(Diagnostic::new(
                        DiagnosticKind::Unplaced,
                        &out[i].id,
                        format!("no free slot between {earliest} and {horizon}"),
                    ));
                }
            }
        }

        let outcome = ScheduleOutcome {
            tasks: out,
            diagnostics,
        };
        info!(
            ?mode,
            tasks = outcome.tasks.len(),
            scheduled = outcome.scheduled_count(),
            unplaced = outcome.unplaced_ids().len(),
            diagnostics = outcome.diagnostics.len(),
            "planner run finished"
        );
        outcome
    }

    /// Moves kept placements that would break dependency order into the
    /// queue: those starting before a placed dependency ends plus the
    /// buffer, and, transitively, those whose dependency is being re-slotted.
    fn requeue_dependents(
        &self,
        out: &mut [Task],
        index: &HashMap<&str, usize>,
        kept: &mut Vec<usize>,
        queue: &mut Vec<usize>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let buffer = Duration::minutes(i64::from(self.options.buffer_between_tasks));
        let mut queued: HashSet<usize> = queue.iter().copied().collect();

        let early: Vec<(usize, String)> = kept
            .iter()
            .filter_map(|&i| early_dependency(out, index, i, buffer).map(|dep| (i, dep.to_string())))
            .collect();
        for (i, dep) in early {
            debug!(task = %out[i].id, dependency = %dep, "starts before its dependency ends; re-slotting");
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::DependencyRequeued,
                &out[i].id,
                format!("starts before dependency '{dep}' ends"),
            ));
            out[i].clear_schedule();
            kept.retain(|&k| k != i);
            queued.insert(i);
            queue.push(i);
        }

        loop {
            let moving: Vec<usize> = kept
                .iter()
                .copied()
                .filter(|&i| {
                    out[i]
                        .dependencies
                        .iter()
                        .filter_map(|d| index.get(d.as_str()))
                        .any(|j| queued.contains(j))
                })
                .collect();
            if moving.is_empty() {
                break;
            }
            for i in moving {
                debug!(task = %out[i].id, "dependency is moving; re-slotting");
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::DependencyRequeued,
                    &out[i].id,
                    "a dependency was re-slotted",
                ));
                out[i].clear_schedule();
                kept.retain(|&k| k != i);
                queued.insert(i);
                queue.push(i);
            }
        }
    }
}

/// First dependency of a placed task that ends too late for it.
///
/// Completed dependencies never count, and neither do edges on a
/// dependency cycle, since no placement can satisfy those.
fn early_dependency<'a>(
    tasks: &'a [Task],
    index: &HashMap<&str, usize>,
    i: usize,
    buffer: Duration,
) -> Option<&'a str> {
    let start = tasks[i].scheduled_start?;
    tasks[i]
        .dependencies
        .iter()
        .find(|dep| {
            let Some(&j) = index.get(dep.as_str()) else {
                return false;
            };
            if j == i || tasks[j].completed {
                return false;
            }
            tasks[j]
                .scheduled_window()
                .is_some_and(|w| w.end + buffer > start)
                && !depends_on(tasks, index, j, i)
        })
        .map(String::as_str)
}

/// Whether `from` depends on `target`, directly or transitively.
fn depends_on(tasks: &[Task], index: &HashMap<&str, usize>, from: usize, target: usize) -> bool {
    let mut seen = HashSet::new();
    let mut stack = vec![from];
    while let Some(i) = stack.pop() {
        if i == target {
            return true;
        }
        if !seen.insert(i) {
            continue;
        }
        stack.extend(
            tasks[i]
                .dependencies
                .iter()
                .filter_map(|d| index.get(d.as_str()).copied()),
        );
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::TimeZone;

    // 2024-06-03 is a Monday.
    fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, h, m, 0).unwrap()
    }

    fn planner(now: DateTime<Utc>) -> Planner {
        Planner::new(SchedulingOptions::default()).unwrap().at(now)
    }

    fn start_of(outcome: &ScheduleOutcome, id: &str) -> Option<DateTime<Utc>> {
        outcome.task(id).and_then(|t| t.scheduled_start)
    }

    #[test]
    fn test_urgent_before_event_dependent_after_buffer() {
        let tasks = vec![
            Task::new("A", at(4, 17, 0))
                .with_priority(Priority::Urgent)
                .with_duration(60),
            Task::new("B", at(4, 17, 0))
                .with_priority(Priority::Medium)
                .with_duration(30)
                .with_dependency("A"),
        ];
        let events = vec![Event::new("E", at(3, 10, 0), at(3, 11, 0))];

        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &events, &[]);
        assert_eq!(start_of(&outcome, "A"), Some(at(3, 9, 0)));
        // 10:15 would hit the event, so B goes after it plus buffer.
        assert_eq!(start_of(&outcome, "B"), Some(at(3, 11, 15)));
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_inputs_not_mutated() {
        let tasks = vec![Task::new("A", at(4, 17, 0))];
        let before = tasks.clone();
        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &[], &[]);
        assert_eq!(tasks, before);
        assert!(outcome.task("A").is_some_and(Task::is_scheduled));
    }

    #[test]
    fn test_inverted_start_and_deadline_unplaced() {
        let now = at(3, 8, 0);
        let tasks = vec![Task::new("A", now + Duration::days(1)).with_can_start_from(now + Duration::days(3))];
        let outcome = planner(now).schedule(&tasks, &[], &[]);
        assert_eq!(outcome.unplaced_ids(), vec!["A"]);
        assert!(outcome.has_diagnostic("A", DiagnosticKind::Unplaced));
    }

    #[test]
    fn test_in_progress_untouched_on_reschedule() {
        let now = at(3, 12, 0);
        let running = Task::new("R", at(5, 17, 0))
            .with_duration(60)
            .with_schedule(now - Duration::minutes(10));
        let tasks = vec![running.clone(), Task::new("N", at(5, 17, 0))];
        let events = vec![Event::new("E", at(3, 11, 0), at(3, 13, 0))];

        let outcome = planner(now).reschedule(&tasks, &events, &[]);
        assert_eq!(outcome.task("R"), Some(&running));
        // N must avoid both the running task and the event.
        assert_eq!(start_of(&outcome, "N"), Some(at(3, 13, 15)));
    }

    #[test]
    fn test_completed_untouched_even_with_project() {
        let done = Task::new("D", at(20, 17, 0)).with_completed(true).with_project("P");
        let projects = vec![Project::new("P", at(3, 0, 0), at(10, 0, 0))];
        let outcome = planner(at(3, 8, 0)).reschedule(&[done.clone()], &[], &projects);
        assert_eq!(outcome.task("D"), Some(&done));
    }

    #[test]
    fn test_project_bounds_applied() {
        let projects = vec![Project::new("P", at(5, 0, 0), at(6, 12, 0))];
        let tasks = vec![Task::new("T", at(20, 17, 0)).with_project("P")];
        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &[], &projects);
        let t = outcome.task("T").unwrap();
        assert_eq!(t.deadline, at(6, 12, 0));
        assert_eq!(t.can_start_from, Some(at(5, 0, 0)));
        assert_eq!(t.scheduled_start, Some(at(5, 9, 0)));
    }

    #[test]
    fn test_unknown_project_reported() {
        let tasks = vec![Task::new("T", at(4, 17, 0)).with_project("ghost")];
        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &[], &[]);
        assert!(outcome.has_diagnostic("T", DiagnosticKind::UnknownProject));
        assert!(outcome.task("T").is_some_and(Task::is_scheduled));
    }

    #[test]
    fn test_valid_placement_kept() {
        let tasks = vec![Task::new("T", at(5, 17, 0)).with_schedule(at(4, 14, 0))];
        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &[], &[]);
        assert_eq!(start_of(&outcome, "T"), Some(at(4, 14, 0)));
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_reschedule_replans_valid_placement() {
        let tasks = vec![Task::new("T", at(5, 17, 0)).with_schedule(at(4, 14, 0))];
        let outcome = planner(at(3, 8, 0)).reschedule(&tasks, &[], &[]);
        assert_eq!(start_of(&outcome, "T"), Some(at(3, 9, 0)));
    }

    #[test]
    fn test_time_travel_reslotted() {
        let now = at(3, 12, 0);
        let tasks = vec![Task::new("T", at(5, 17, 0))
            .with_duration(60)
            .with_schedule(at(3, 9, 0))];
        let outcome = planner(now).schedule(&tasks, &[], &[]);
        assert!(outcome.has_diagnostic("T", DiagnosticKind::TimeTravel));
        assert_eq!(start_of(&outcome, "T"), Some(now));
    }

    #[test]
    fn test_event_conflict_moves_after_event() {
        let tasks = vec![Task::new("T", at(5, 17, 0))
            .with_duration(60)
            .with_schedule(at(3, 9, 0))];
        let events = vec![Event::new("E", at(3, 9, 30), at(3, 10, 0))];
        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &events, &[]);
        assert!(outcome.has_diagnostic("T", DiagnosticKind::EventConflict));
        assert_eq!(start_of(&outcome, "T"), Some(at(3, 10, 15)));
    }

    #[test]
    fn test_all_day_event_ignored() {
        let tasks = vec![Task::new("T", at(5, 17, 0)).with_schedule(at(3, 9, 0))];
        let events = vec![Event::new("Holiday", at(3, 0, 0), at(4, 0, 0)).all_day()];
        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &events, &[]);
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(start_of(&outcome, "T"), Some(at(3, 9, 0)));
    }

    #[test]
    fn test_dependent_requeued_when_dependency_moves() {
        let now = at(3, 12, 0);
        let tasks = vec![
            // Stale: started in the past, will move to 12:00.
            Task::new("A", at(5, 17, 0)).with_duration(60).with_schedule(at(3, 9, 0)),
            // Valid on its own, but would now start before A ends.
            Task::new("B", at(5, 17, 0))
                .with_duration(30)
                .with_schedule(at(3, 12, 30))
                .with_dependency("A"),
        ];
        let outcome = planner(now).schedule(&tasks, &[], &[]);
        assert!(outcome.has_diagnostic("B", DiagnosticKind::DependencyRequeued));
        assert_eq!(start_of(&outcome, "A"), Some(at(3, 12, 0)));
        assert_eq!(start_of(&outcome, "B"), Some(at(3, 13, 15)));
    }

    #[test]
    fn test_kept_dependent_before_kept_dependency_requeued() {
        let tasks = vec![
            Task::new("A", at(5, 17, 0)).with_duration(60).with_schedule(at(3, 14, 0)),
            Task::new("B", at(5, 17, 0))
                .with_duration(60)
                .with_schedule(at(3, 10, 0))
                .with_dependency("A"),
        ];
        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &[], &[]);
        assert_eq!(start_of(&outcome, "A"), Some(at(3, 14, 0)));
        assert_eq!(start_of(&outcome, "B"), Some(at(3, 15, 15)));
        assert!(outcome.has_diagnostic("B", DiagnosticKind::DependencyRequeued));
        assert!(!outcome.has_diagnostic("A", DiagnosticKind::DependencyRequeued));
    }

    #[test]
    fn test_kept_dependent_inside_buffer_requeued() {
        let tasks = vec![
            Task::new("A", at(5, 17, 0)).with_duration(60).with_schedule(at(3, 9, 0)),
            // Starts right at A's end, inside the buffer.
            Task::new("B", at(5, 17, 0))
                .with_duration(30)
                .with_schedule(at(3, 10, 0))
                .with_dependency("A"),
        ];
        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &[], &[]);
        assert_eq!(start_of(&outcome, "B"), Some(at(3, 10, 15)));
        assert!(outcome.has_diagnostic("B", DiagnosticKind::DependencyRequeued));
    }

    #[test]
    fn test_kept_dependent_after_running_dependency_requeued() {
        let now = at(3, 10, 30);
        let tasks = vec![
            Task::new("R", at(5, 17, 0)).with_duration(60).with_schedule(at(3, 10, 0)),
            Task::new("B", at(5, 17, 0))
                .with_duration(30)
                .with_schedule(at(3, 11, 0))
                .with_dependency("R"),
        ];
        let outcome = planner(now).schedule(&tasks, &[], &[]);
        assert_eq!(outcome.task("R"), Some(&tasks[0]));
        assert_eq!(start_of(&outcome, "B"), Some(at(3, 11, 15)));
    }

    #[test]
    fn test_kept_cycle_left_in_place() {
        let tasks = vec![
            Task::new("a", at(5, 17, 0)).with_schedule(at(3, 9, 0)).with_dependency("b"),
            Task::new("b", at(5, 17, 0)).with_schedule(at(3, 11, 0)).with_dependency("a"),
        ];
        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &[], &[]);
        assert_eq!(outcome.tasks, tasks);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_dangling_scheduled_end_cleared() {
        let now = at(3, 8, 0);
        let mut task = Task::new("T", now + Duration::days(1)).with_can_start_from(now + Duration::days(3));
        task.scheduled_end = Some(at(3, 10, 0));
        let outcome = planner(now).schedule(&[task], &[], &[]);
        let t = outcome.task("T").unwrap();
        assert_eq!(t.scheduled_start, None);
        assert_eq!(t.scheduled_end, None);
        assert!(outcome.has_diagnostic("T", DiagnosticKind::Unplaced));
    }

    #[test]
    fn test_longest_horizon_places_overdue_task() {
        let options = SchedulingOptions {
            planning_horizon_days: crate::options::MAX_PLANNING_HORIZON_DAYS,
            ..SchedulingOptions::default()
        };
        let now = at(3, 8, 0);
        let planner = Planner::new(options).unwrap().at(now);
        let outcome = planner.schedule(&[Task::new("late", at(1, 17, 0))], &[], &[]);
        assert_eq!(start_of(&outcome, "late"), Some(at(3, 9, 0)));
    }

    #[test]
    fn test_overdue_keeps_priority_and_extends_horizon() {
        let now = at(3, 8, 0);
        let tasks = vec![
            Task::new("late", at(1, 17, 0)).with_priority(Priority::Low),
            Task::new("urgent", at(4, 17, 0)).with_priority(Priority::Urgent),
        ];
        let outcome = planner(now).schedule(&tasks, &[], &[]);
        assert_eq!(start_of(&outcome, "urgent"), Some(at(3, 9, 0)));
        assert_eq!(start_of(&outcome, "late"), Some(at(3, 10, 15)));
        assert!(outcome.has_diagnostic("late", DiagnosticKind::PlacedAfterDeadline));
    }

    #[test]
    fn test_cycle_still_places_everything() {
        let tasks = vec![
            Task::new("a", at(5, 17, 0)).with_dependency("b"),
            Task::new("b", at(5, 17, 0)).with_dependency("a"),
        ];
        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &[], &[]);
        assert_eq!(outcome.diagnostics_of(DiagnosticKind::CycleDetected).len(), 1);
        assert!(outcome.unplaced_ids().is_empty());
    }

    #[test]
    fn test_blocked_by_unplaced_dependency() {
        let tasks = vec![
            Task::new("big", at(3, 17, 0)).with_duration(600),
            Task::new("after", at(5, 17, 0)).with_dependency("big"),
        ];
        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &[], &[]);
        assert!(outcome.has_diagnostic("big", DiagnosticKind::Unplaced));
        assert!(outcome.has_diagnostic("after", DiagnosticKind::BlockedByDependency));
        assert_eq!(outcome.unplaced_ids(), vec!["big", "after"]);
    }

    #[test]
    fn test_completed_dependency_does_not_block() {
        let tasks = vec![
            Task::new("done", at(1, 17, 0)).with_completed(true),
            Task::new("next", at(5, 17, 0)).with_dependency("done"),
        ];
        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &[], &[]);
        assert_eq!(start_of(&outcome, "next"), Some(at(3, 9, 0)));
    }

    #[test]
    fn test_unknown_dependency_reported() {
        let tasks = vec![Task::new("t", at(5, 17, 0)).with_dependency("ghost")];
        let outcome = planner(at(3, 8, 0)).schedule(&tasks, &[], &[]);
        assert!(outcome.has_diagnostic("t", DiagnosticKind::UnknownDependency));
        assert_eq!(start_of(&outcome, "t"), Some(at(3, 9, 0)));
    }

    #[test]
    fn test_idempotent() {
        let tasks = vec![
            Task::new("a", at(4, 17, 0)).with_priority(Priority::High).with_duration(120),
            Task::new("b", at(5, 17, 0)).with_dependency("a"),
            Task::new("c", at(3, 10, 0)).with_duration(300),
        ];
        let events = vec![Event::new("E", at(3, 13, 0), at(3, 14, 0))];
        let p = planner(at(3, 8, 0));
        let first = p.schedule(&tasks, &events, &[]);
        let second = p.schedule(&first.tasks, &events, &[]);
        assert_eq!(first.tasks, second.tasks);
    }
}
