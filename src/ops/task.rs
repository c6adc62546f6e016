//! Task manager: updates, batch updates, and search over the board's task
//! map. Task creation lives in `ops::board` because it also consumes the
//! board's ID counter.

use crate::clock::Clock;
use crate::domain::sorting::sort_tasks;
use crate::domain::{Board, Task, TaskDates, TaskPatch};
use crate::error::{Entity, Result, TavlaError};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

pub fn get_task(board: &Board, id: u64) -> Option<&Task> {
    board.tasks.get(&id)
}

fn task_not_found(id: u64) -> TavlaError {
    TavlaError::NotFound {
        entity: Entity::Task,
        key: id.to_string(),
    }
}

/// Merges a patch over a task. `id` and `dates.created` always survive;
/// `updated` is refreshed; `moved` is refreshed only when the patch changes
/// the column to a different value.
fn apply_patch(task: &Task, patch: &TaskPatch, now: DateTime<Utc>) -> Task {
    let column_changed = patch
        .column
        .as_ref()
        .is_some_and(|column| *column != task.column);

    Task {
        id: task.id,
        title: patch.title.clone().unwrap_or_else(|| task.title.clone()),
        description: patch
            .description
            .clone()
            .unwrap_or_else(|| task.description.clone()),
        column: patch.column.clone().unwrap_or_else(|| task.column.clone()),
        sprint: patch.sprint.clone().or_else(|| task.sprint.clone()),
        labels: patch.labels.clone().or_else(|| task.labels.clone()),
        story_points: patch.story_points.or(task.story_points),
        priority: patch.priority.or(task.priority),
        dates: TaskDates {
            created: task.dates.created,
            updated: now,
            moved: if column_changed {
                Some(now)
            } else {
                task.dates.moved
            },
        },
    }
}

pub fn update_task(board: &Board, id: u64, patch: &TaskPatch, clock: &dyn Clock) -> Result<Board> {
    let task = board.tasks.get(&id).ok_or_else(|| task_not_found(id))?;

    let now = clock.now();
    let mut next = board.clone();
    next.tasks.insert(id, apply_patch(task, patch, now));
    next.dates.updated = now;
    Ok(next)
}

/// Applies the single-task update rule across a whole batch in one pass.
///
/// All-or-nothing: every ID is resolved against the input board before any
/// task is rebuilt, so one missing ID fails the call and no new board value
/// exists. Returns the new board and exactly the tasks that were targeted.
/// The board timestamp is stamped once, also for an empty batch.
pub fn update_tasks(
    board: &Board,
    updates: &BTreeMap<u64, TaskPatch>,
    clock: &dyn Clock,
) -> Result<(Board, BTreeMap<u64, Task>)> {
    let now = clock.now();

    let mut touched = BTreeMap::new();
    for (id, patch) in updates {
        let task = board.tasks.get(id).ok_or_else(|| task_not_found(*id))?;
        touched.insert(*id, apply_patch(task, patch, now));
    }

    let mut next = board.clone();
    next.tasks
        .extend(touched.iter().map(|(id, task)| (*id, task.clone())));
    next.dates.updated = now;
    Ok((next, touched))
}

/// Searches tasks case-insensitively and returns matches in canonical
/// order.
///
/// An empty query returns every task. `title`, `description`, and `sprint`
/// match by substring; `labels` matches when any element contains the
/// query. When `keys` is given, only the named fields are checked.
pub fn find_tasks(board: &Board, query: &str, keys: Option<&[&str]>) -> Vec<Task> {
    if query.is_empty() {
        return sort_tasks(board.tasks.values().cloned().collect());
    }

    let query = query.to_lowercase();
    let wants = |key: &str| keys.map_or(true, |keys| keys.contains(&key));
    let matches = |task: &Task| {
        (wants("title") && task.title.to_lowercase().contains(&query))
            || (wants("description") && task.description.to_lowercase().contains(&query))
            || (wants("sprint")
                && task
                    .sprint
                    .as_ref()
                    .is_some_and(|sprint| sprint.to_lowercase().contains(&query)))
            || (wants("labels")
                && task.labels.as_ref().is_some_and(|labels| {
                    labels.iter().any(|label| label.to_lowercase().contains(&query))
                }))
    };

    sort_tasks(
        board
            .tasks
            .values()
            .filter(|task| matches(task))
            .cloned()
            .collect(),
    )
}
