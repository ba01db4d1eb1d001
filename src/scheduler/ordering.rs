//! Placement ordering: priority first, then dependency order.
//!
//! # Algorithm
//! 1. Stable sort by priority weight (descending), then deadline (ascending).
//! 2. Depth-first topological visit in that order; a task is emitted only
//!    after every dependency inside the candidate set has been emitted.
//!
//! Dependency order always wins over priority. A back edge found while
//! visiting (a dependency still on the recursion stack) closes a cycle;
//! that edge is reported and skipped so a total order is still produced.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::models::Task;

/// Priority comparison: weight descending, then deadline ascending.
pub fn priority_cmp(a: &Task, b: &Task) -> Ordering {
    b.priority
        .weight()
        .cmp(&a.priority.weight())
        .then_with(|| a.deadline.cmp(&b.deadline))
}

/// Sorts task indices by priority. Stable, so equal tasks keep input order.
pub fn sort_by_priority(tasks: &[Task], indices: &mut [usize]) {
    indices.sort_by(|&a, &b| priority_cmp(&tasks[a], &tasks[b]));
}

/// A dependency edge `task -> dependency`, by index and id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    pub task: usize,
    pub dependency: String,
}

/// Output of [`topo_sort`].
#[derive(Debug, Default)]
pub struct TopoOrder {
    /// Candidate indices, dependencies before dependents.
    pub order: Vec<usize>,
    /// Edges skipped because they close a cycle.
    pub cycles: Vec<DependencyEdge>,
    /// Edges naming ids absent from the whole task list.
    pub unknown: Vec<DependencyEdge>,
}

impl TopoOrder {
    /// Edges the placement stage must not wait on.
    pub fn ignored_edges(&self) -> HashSet<(usize, &str)> {
        self.cycles
            .iter()
            .chain(&self.unknown)
            .map(|e| (e.task, e.dependency.as_str()))
            .collect()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Topologically orders `candidates` (already priority-sorted).
///
/// `index` maps every task id in `tasks` to its position. Dependencies
/// on tasks outside `candidates` do not affect the order; they are
/// honoured at placement time through their existing schedule.
pub fn topo_sort(tasks: &[Task], candidates: &[usize], index: &HashMap<&str, usize>) -> TopoOrder {
    let mut marks: HashMap<usize, Mark> = candidates.iter().map(|&i| (i, Mark::Unvisited)).collect();
    let mut out = TopoOrder::default();

    for &i in candidates {
        if marks.get(&i) == Some(&Mark::Unvisited) {
            visit(i, tasks, index, &mut marks, &mut out);
        }
    }
    out
}

fn visit(
    node: usize,
    tasks: &[Task],
    index: &HashMap<&str, usize>,
    marks: &mut HashMap<usize, Mark>,
    out: &mut TopoOrder,
) {
    marks.insert(node, Mark::Visiting);

    for dep in &tasks[node].dependencies {
        let Some(&dep_idx) = index.get(dep.as_str()) else {
            out.unknown.push(DependencyEdge {
                task: node,
                dependency: dep.clone(),
            });
            continue;
        };
        match marks.get(&dep_idx) {
            Some(Mark::Visiting) => out.cycles.push(DependencyEdge {
                task: node,
                dependency: dep.clone(),
            }),
            Some(Mark::Unvisited) => visit(dep_idx, tasks, index, marks, out),
            // Done, or outside the candidate set.
            _ => {}
        }
    }

    marks.insert(node, Mark::Done);
    out.order.push(node);
}
