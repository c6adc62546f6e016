//! Column manager: CRUD and reordering over the board's workflow stages.

use crate::clock::Clock;
use crate::domain::sorting::sort_tasks;
use crate::domain::{Board, Column, ColumnPatch, Task};
use crate::error::{Entity, Result, TavlaError};

pub fn get_column<'a>(board: &'a Board, name: &str) -> Option<&'a Column> {
    board.columns.iter().find(|column| column.name == name)
}

/// Adds a column, inserting at `position` when it lies within
/// `0..=columns.len()` and appending otherwise. Column names are unique,
/// compared exactly.
pub fn add_column(
    board: &Board,
    column: Column,
    position: Option<usize>,
    clock: &dyn Clock,
) -> Result<Board> {
    if get_column(board, &column.name).is_some() {
        return Err(TavlaError::DuplicateName {
            entity: Entity::Column,
            name: column.name,
        });
    }

    let mut next = board.clone();
    match position {
        Some(position) if position <= next.columns.len() => {
            next.columns.insert(position, column);
        }
        _ => next.columns.push(column),
    }
    next.dates.updated = clock.now();
    Ok(next)
}

pub fn update_column(
    board: &Board,
    name: &str,
    patch: ColumnPatch,
    clock: &dyn Clock,
) -> Result<Board> {
    let index = board
        .columns
        .iter()
        .position(|column| column.name == name)
        .ok_or_else(|| TavlaError::NotFound {
            entity: Entity::Column,
            key: name.to_string(),
        })?;

    let mut next = board.clone();
    if let Some(new_name) = patch.name {
        next.columns[index].name = new_name;
    }
    next.dates.updated = clock.now();
    Ok(next)
}

/// Removes a column. Removing a name that does not exist is a no-op and
/// returns an equal board, timestamp included; removing a column that any
/// task still references fails with the task count.
pub fn remove_column(board: &Board, name: &str, clock: &dyn Clock) -> Result<Board> {
    if get_column(board, name).is_none() {
        return Ok(board.clone());
    }

    let tasks = board
        .tasks
        .values()
        .filter(|task| task.column == name)
        .count();
    if tasks > 0 {
        return Err(TavlaError::ColumnNotEmpty {
            name: name.to_string(),
            tasks,
        });
    }

    let mut next = board.clone();
    next.columns.retain(|column| column.name != name);
    next.dates.updated = clock.now();
    Ok(next)
}

/// Moves a column to `new_position`, which must lie within
/// `0..columns.len()`. The board timestamp is refreshed even when the
/// effective order did not change.
pub fn move_column(
    board: &Board,
    name: &str,
    new_position: usize,
    clock: &dyn Clock,
) -> Result<Board> {
    let index = board
        .columns
        .iter()
        .position(|column| column.name == name)
        .ok_or_else(|| TavlaError::NotFound {
            entity: Entity::Column,
            key: name.to_string(),
        })?;

    if new_position >= board.columns.len() {
        return Err(TavlaError::InvalidPosition {
            position: new_position,
            max: board.columns.len() - 1,
        });
    }

    let mut next = board.clone();
    let column = next.columns.remove(index);
    next.columns.insert(new_position, column);
    next.dates.updated = clock.now();
    Ok(next)
}

/// Tasks referencing the column, in canonical order
pub fn tasks_in_column(board: &Board, name: &str) -> Vec<Task> {
    sort_tasks(
        board
            .tasks
            .values()
            .filter(|task| task.column == name)
            .cloned()
            .collect(),
    )
}

pub fn column_task_count(board: &Board, name: &str) -> usize {
    board
        .tasks
        .values()
        .filter(|task| task.column == name)
        .count()
}

pub fn column_names(board: &Board) -> Vec<String> {
    board.columns.iter().map(|column| column.name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::domain::{NewBoard, NewTask};
    use crate::ops::board::{create_board, new_task};
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn clock(s: &str) -> FixedClock {
        FixedClock(ts(s))
    }

    fn board() -> Board {
        create_board(NewBoard::default(), &clock("2025-01-01T00:00:00Z"))
    }

    #[test]
    fn test_add_column_appends_by_default() {
        let later = clock("2025-01-02T00:00:00Z");
        let next = add_column(&board(), Column::new("review".to_string()), None, &later).unwrap();

        assert_eq!(
            column_names(&next),
            vec!["backlog", "todo", "working", "done", "review"]
        );
        assert_eq!(next.dates.updated, later.0);
    }

    #[test]
    fn test_add_column_inserts_at_position() {
        let next = add_column(
            &board(),
            Column::new("triage".to_string()),
            Some(1),
            &clock("2025-01-02T00:00:00Z"),
        )
        .unwrap();

        assert_eq!(
            column_names(&next),
            vec!["backlog", "triage", "todo", "working", "done"]
        );
    }

    #[test]
    fn test_add_column_out_of_range_position_appends() {
        let next = add_column(
            &board(),
            Column::new("review".to_string()),
            Some(99),
            &clock("2025-01-02T00:00:00Z"),
        )
        .unwrap();

        assert_eq!(next.columns.last().unwrap().name, "review");
    }

    #[test]
    fn test_add_duplicate_column_fails() {
        let result = add_column(
            &board(),
            Column::new("todo".to_string()),
            None,
            &clock("2025-01-02T00:00:00Z"),
        );

        assert!(matches!(
            result,
            Err(TavlaError::DuplicateName { entity: Entity::Column, ref name }) if name == "todo"
        ));
    }

    #[test]
    fn test_update_column_renames() {
        let next = update_column(
            &board(),
            "todo",
            ColumnPatch {
                name: Some("ready".to_string()),
            },
            &clock("2025-01-02T00:00:00Z"),
        )
        .unwrap();

        assert!(get_column(&next, "todo").is_none());
        assert_eq!(next.columns[1].name, "ready");
    }

    #[test]
    fn test_update_missing_column_fails() {
        let result = update_column(
            &board(),
            "nope",
            ColumnPatch::default(),
            &clock("2025-01-02T00:00:00Z"),
        );

        assert!(matches!(result, Err(TavlaError::NotFound { .. })));
    }

    #[test]
    fn test_remove_missing_column_is_noop() {
        let original = board();
        let next = remove_column(&original, "nope", &clock("2025-01-02T00:00:00Z")).unwrap();

        // Equal board, timestamp included
        assert_eq!(next, original);
    }

    #[test]
    fn test_remove_nonempty_column_fails_with_count() {
        let original = board();
        let (with_task, _) = new_task(
            &original,
            NewTask {
                title: "work".to_string(),
                ..NewTask::default()
            },
            &clock("2025-01-01T00:00:00Z"),
        );

        // The new task sits in the default column, "backlog"
        let result = remove_column(&with_task, "backlog", &clock("2025-01-02T00:00:00Z"));
        match result {
            Err(TavlaError::ColumnNotEmpty { name, tasks }) => {
                assert_eq!(name, "backlog");
                assert_eq!(tasks, 1);
            }
            other => panic!("expected ColumnNotEmpty, got {:?}", other),
        }
    }

    #[test]
    fn test_remove_empty_column() {
        let later = clock("2025-01-02T00:00:00Z");
        let next = remove_column(&board(), "working", &later).unwrap();

        assert_eq!(column_names(&next), vec!["backlog", "todo", "done"]);
        assert_eq!(next.dates.updated, later.0);
    }

    #[test]
    fn test_move_column() {
        let next = move_column(&board(), "done", 0, &clock("2025-01-02T00:00:00Z")).unwrap();

        assert_eq!(
            column_names(&next),
            vec!["done", "backlog", "todo", "working"]
        );
    }

    #[test]
    fn test_move_column_to_same_position_still_stamps() {
        let later = clock("2025-01-02T00:00:00Z");
        let next = move_column(&board(), "todo", 1, &later).unwrap();

        assert_eq!(column_names(&next), column_names(&board()));
        assert_eq!(next.dates.updated, later.0);
    }

    #[test]
    fn test_move_column_out_of_range_fails() {
        let result = move_column(&board(), "todo", 4, &clock("2025-01-02T00:00:00Z"));

        assert!(matches!(
            result,
            Err(TavlaError::InvalidPosition { position: 4, max: 3 })
        ));
    }

    #[test]
    fn test_move_missing_column_fails() {
        let result = move_column(&board(), "nope", 0, &clock("2025-01-02T00:00:00Z"));
        assert!(matches!(result, Err(TavlaError::NotFound { .. })));
    }

    #[test]
    fn test_tasks_in_column_sorted_canonically() {
        let start = clock("2025-01-01T00:00:00Z");
        let (b, _) = new_task(
            &board(),
            NewTask {
                title: "plain".to_string(),
                ..NewTask::default()
            },
            &start,
        );
        let (b, _) = new_task(
            &b,
            NewTask {
                title: "urgent".to_string(),
                priority: Some(1.0),
                ..NewTask::default()
            },
            &start,
        );

        let tasks = tasks_in_column(&b, "backlog");
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "urgent");
        assert_eq!(column_task_count(&b, "backlog"), 2);
        assert_eq!(column_task_count(&b, "done"), 0);
    }
}
