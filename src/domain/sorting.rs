use crate::domain::task::Task;
use std::cmp::Ordering;

/// Canonical task order, used everywhere tasks are listed.
///
/// Tasks with a priority sort before tasks without one; among prioritized
/// tasks, ascending numeric priority. Ties (including the all-undefined
/// case) break by `dates.updated` descending, most recently touched first.
///
/// The sort is stable and operates on its own vector; the caller's board
/// is never touched.
pub fn sort_tasks(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(compare_tasks);
    tasks
}

fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    match (a.priority, b.priority) {
        (Some(pa), Some(pb)) => pa
            .partial_cmp(&pb)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.dates.updated.cmp(&a.dates.updated)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.dates.updated.cmp(&a.dates.updated),
    }
}
