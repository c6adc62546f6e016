//! Board orchestrator: board construction, task creation (which consumes
//! the board's ID counter), and the sprint wrappers that add the
//! board-level timestamp the sprint manager leaves alone.

use crate::clock::Clock;
use crate::domain::{
    Board, BoardDates, Column, Metadata, NewBoard, NewSprint, NewTask, Sprint, SprintPatch, Task,
    TaskDates,
};
use crate::error::Result;
use crate::migrate::BOARD_VERSION;
use crate::ops::sprint;

/// Builds a fresh board, filling every unset field with its default.
///
/// A board seeded with tasks gets `next_id` of one past the highest seeded
/// ID, so allocation can never collide with what the caller provided.
pub fn create_board(data: NewBoard, clock: &dyn Clock) -> Board {
    let now = clock.now();
    let tasks = data.tasks.unwrap_or_default();
    let next_id = tasks.keys().max().map_or(1, |id| id + 1);

    Board {
        name: data.name.unwrap_or_else(|| "My Board".to_string()),
        description: data
            .description
            .or_else(|| Some("My local kanban board".to_string())),
        columns: data.columns.unwrap_or_else(|| {
            vec![
                Column::new("backlog".to_string()),
                Column::new("todo".to_string()),
                Column::new("working".to_string()),
                Column::new("done".to_string()),
            ]
        }),
        tasks,
        labels: data.labels,
        sprints: data.sprints,
        metadata: Metadata {
            next_id,
            version: BOARD_VERSION.to_string(),
        },
        dates: BoardDates {
            created: now,
            updated: now,
            saved: now,
        },
    }
}

/// The column new tasks land in
pub fn default_column(board: &Board) -> Option<&Column> {
    board.columns.first()
}

/// Creates a task on the board.
///
/// The task takes `metadata.next_id` as its ID and the board's default
/// column (an empty string when the board has no columns); the counter is
/// consumed exactly once per task and never reused.
pub fn new_task(board: &Board, data: NewTask, clock: &dyn Clock) -> (Board, Task) {
    let now = clock.now();
    let id = board.metadata.next_id;

    let task = Task {
        id,
        title: data.title,
        description: data.description,
        column: default_column(board)
            .map(|column| column.name.clone())
            .unwrap_or_default(),
        sprint: data.sprint,
        labels: data.labels,
        story_points: data.story_points,
        priority: data.priority,
        dates: TaskDates {
            created: data.created.unwrap_or(now),
            updated: data.updated.unwrap_or(now),
            moved: data.moved,
        },
    };

    let mut next = board.clone();
    next.tasks.insert(id, task.clone());
    next.metadata.next_id = id + 1;
    next.dates.updated = now;
    (next, task)
}

/// Adds a sprint and stamps the board timestamp
pub fn add_sprint(board: &Board, data: NewSprint, clock: &dyn Clock) -> Result<(Board, Sprint)> {
    let new = sprint::create_sprint(data, clock);
    let mut next = sprint::add_sprint(board, new.clone())?;
    next.dates.updated = clock.now();
    Ok((next, new))
}

/// Updates a sprint and stamps the board timestamp
pub fn update_sprint(
    board: &Board,
    name: &str,
    patch: SprintPatch,
    clock: &dyn Clock,
) -> Result<Board> {
    let mut next = sprint::update_sprint(board, name, patch)?;
    next.dates.updated = clock.now();
    Ok(next)
}

/// Removes a sprint, stamping the board timestamp only when a sprint was
/// actually removed; an unknown name returns an equal board
pub fn remove_sprint(board: &Board, name: &str, clock: &dyn Clock) -> Board {
    if sprint::get_sprint(board, name).is_none() {
        return board.clone();
    }
    let mut next = sprint::remove_sprint(board, name);
    next.dates.updated = clock.now();
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{DateTime, Utc};
    use std::collections::BTreeMap;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn clock(s: &str) -> FixedClock {
        FixedClock(ts(s))
    }

    #[test]
    fn test_create_board_defaults() {
        let c = clock("2025-01-01T00:00:00Z");
        let board = create_board(NewBoard::default(), &c);

        assert_eq!(board.name, "My Board");
        assert_eq!(board.description.as_deref(), Some("My local kanban board"));
        assert_eq!(
            board.columns.iter().map(|col| col.name.as_str()).collect::<Vec<_>>(),
            vec!["backlog", "todo", "working", "done"]
        );
        assert!(board.tasks.is_empty());
        assert!(board.labels.is_none());
        assert!(board.sprints.is_none());
        assert_eq!(board.metadata.next_id, 1);
        assert_eq!(board.metadata.version, BOARD_VERSION);
        assert_eq!(board.dates.created, c.0);
        assert_eq!(board.dates.updated, c.0);
        assert_eq!(board.dates.saved, c.0);
    }

    #[test]
    fn test_create_board_seeded_with_tasks_advances_next_id() {
        let c = clock("2025-01-01T00:00:00Z");
        let (donor, _) = new_task(
            &create_board(NewBoard::default(), &c),
            NewTask { title: "a".to_string(), ..NewTask::default() },
            &c,
        );
        let (donor, _) = new_task(
            &donor,
            NewTask { title: "b".to_string(), ..NewTask::default() },
            &c,
        );

        let seeded = create_board(
            NewBoard {
                tasks: Some(donor.tasks.clone()),
                ..NewBoard::default()
            },
            &c,
        );

        assert_eq!(seeded.metadata.next_id, 3);
    }

    #[test]
    fn test_task_ids_are_sequential_without_reuse() {
        let c = clock("2025-01-01T00:00:00Z");
        let board = create_board(NewBoard::default(), &c);

        let (board, t1) = new_task(&board, NewTask::default(), &c);
        let (board, t2) = new_task(&board, NewTask::default(), &c);
        assert_eq!((t1.id, t2.id), (1, 2));

        // Dropping a task from the map never recycles its ID
        let mut pruned = board.clone();
        pruned.tasks.remove(&t1.id);
        let (pruned, t3) = new_task(&pruned, NewTask::default(), &c);
        assert_eq!(t3.id, 3);
        assert_eq!(pruned.metadata.next_id, 4);
    }

    #[test]
    fn test_new_task_lands_in_default_column() {
        let c = clock("2025-01-01T00:00:00Z");
        let board = create_board(NewBoard::default(), &c);

        let later = clock("2025-01-02T00:00:00Z");
        let (next, task) = new_task(
            &board,
            NewTask { title: "t".to_string(), ..NewTask::default() },
            &later,
        );

        assert_eq!(task.column, "backlog");
        assert_eq!(task.dates.created, later.0);
        assert_eq!(task.dates.updated, later.0);
        assert!(task.dates.moved.is_none());
        assert_eq!(next.dates.updated, later.0);
    }

    #[test]
    fn test_new_task_on_board_without_columns() {
        let c = clock("2025-01-01T00:00:00Z");
        let board = create_board(
            NewBoard {
                columns: Some(Vec::new()),
                ..NewBoard::default()
            },
            &c,
        );

        let (_, task) = new_task(&board, NewTask::default(), &c);
        assert_eq!(task.column, "");
    }

    #[test]
    fn test_new_task_keeps_supplied_dates() {
        let c = clock("2025-06-01T00:00:00Z");
        let board = create_board(NewBoard::default(), &c);

        let (_, task) = new_task(
            &board,
            NewTask {
                title: "imported".to_string(),
                created: Some(ts("2024-01-01T00:00:00Z")),
                updated: Some(ts("2024-02-01T00:00:00Z")),
                ..NewTask::default()
            },
            &c,
        );

        assert_eq!(task.dates.created, ts("2024-01-01T00:00:00Z"));
        assert_eq!(task.dates.updated, ts("2024-02-01T00:00:00Z"));
    }

    #[test]
    fn test_sprint_orchestration_stamps_board() {
        let c = clock("2025-01-01T00:00:00Z");
        let board = create_board(NewBoard::default(), &c);

        let later = clock("2025-01-02T00:00:00Z");
        let (board, sprint) = add_sprint(
            &board,
            NewSprint { name: "Sprint 1".to_string(), ..NewSprint::default() },
            &later,
        )
        .unwrap();
        assert_eq!(sprint.name, "Sprint 1");
        assert_eq!(board.dates.updated, later.0);

        let even_later = clock("2025-01-03T00:00:00Z");
        let board = update_sprint(&board, "sprint 1", SprintPatch::default(), &even_later).unwrap();
        assert_eq!(board.dates.updated, even_later.0);

        let removal = clock("2025-01-04T00:00:00Z");
        let board = remove_sprint(&board, "SPRINT 1", &removal);
        assert!(board.sprints.as_ref().unwrap().is_empty());
        assert_eq!(board.dates.updated, removal.0);
    }

    #[test]
    fn test_remove_missing_sprint_leaves_board_untouched() {
        let c = clock("2025-01-01T00:00:00Z");
        let board = create_board(NewBoard::default(), &c);

        let next = remove_sprint(&board, "nope", &clock("2025-01-02T00:00:00Z"));
        assert_eq!(next, board);
    }

    #[test]
    fn test_priority_task_sorts_before_unprioritized() {
        let c = clock("2025-01-01T00:00:00Z");
        let board = create_board(
            NewBoard {
                columns: Some(vec![
                    Column::new("todo".to_string()),
                    Column::new("doing".to_string()),
                    Column::new("done".to_string()),
                ]),
                ..NewBoard::default()
            },
            &c,
        );
        let (board, t1) = new_task(
            &board,
            NewTask { title: "first".to_string(), priority: Some(1.0), ..NewTask::default() },
            &c,
        );
        let (board, t2) = new_task(
            &board,
            NewTask { title: "second".to_string(), ..NewTask::default() },
            &c,
        );

        let found = crate::ops::task::find_tasks(&board, "", None);
        assert_eq!(
            found.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![t1.id, t2.id]
        );

        let mut by_id: BTreeMap<u64, &Task> = BTreeMap::new();
        for task in &found {
            by_id.insert(task.id, task);
        }
        assert_eq!(by_id[&t1.id].column, "todo");
        assert_eq!(by_id[&t2.id].column, "todo");
    }
}
