//! Sprint manager: CRUD over the board's iterations plus date-derived
//! classification. Name comparisons are case-insensitive.
//!
//! Unlike the column/label/task managers, none of these mutations stamp the
//! board-level `dates.updated`; the orchestrator in `ops::board` does that
//! for sprint operations.

use crate::clock::Clock;
use crate::domain::{Board, NewSprint, Sprint, SprintDates, SprintPatch};
use crate::error::{Entity, Result, TavlaError};
use chrono::{DateTime, Utc};

/// Builds a sprint from its creation delta; `created` and `starts` default
/// to the current instant
pub fn create_sprint(data: NewSprint, clock: &dyn Clock) -> Sprint {
    let now = clock.now();
    Sprint {
        name: data.name,
        description: data.description,
        capacity: data.capacity,
        dates: SprintDates {
            created: data.created.unwrap_or(now),
            starts: data.starts.unwrap_or(now),
            ends: data.ends,
        },
    }
}

pub fn get_sprint<'a>(board: &'a Board, name: &str) -> Option<&'a Sprint> {
    let name = name.to_lowercase();
    board
        .sprints
        .as_ref()?
        .iter()
        .find(|sprint| sprint.name.to_lowercase() == name)
}

/// Adds a sprint, creating the collection on first use
pub fn add_sprint(board: &Board, sprint: Sprint) -> Result<Board> {
    if get_sprint(board, &sprint.name).is_some() {
        return Err(TavlaError::DuplicateName {
            entity: Entity::Sprint,
            name: sprint.name,
        });
    }

    let mut next = board.clone();
    next.sprints.get_or_insert_with(Vec::new).push(sprint);
    Ok(next)
}

/// Applies a partial update; the dates patch merges field-by-field into the
/// existing dates rather than replacing them wholesale
pub fn update_sprint(board: &Board, name: &str, patch: SprintPatch) -> Result<Board> {
    let not_found = || TavlaError::NotFound {
        entity: Entity::Sprint,
        key: name.to_string(),
    };
    let lowered = name.to_lowercase();

    let mut next = board.clone();
    let sprints = next.sprints.as_mut().ok_or_else(not_found)?;
    let index = sprints
        .iter()
        .position(|sprint| sprint.name.to_lowercase() == lowered)
        .ok_or_else(not_found)?;

    let sprint = &mut sprints[index];
    if let Some(new_name) = patch.name {
        sprint.name = new_name;
    }
    if let Some(description) = patch.description {
        sprint.description = Some(description);
    }
    if let Some(capacity) = patch.capacity {
        sprint.capacity = Some(capacity);
    }
    if let Some(created) = patch.dates.created {
        sprint.dates.created = created;
    }
    if let Some(starts) = patch.dates.starts {
        sprint.dates.starts = starts;
    }
    if let Some(ends) = patch.dates.ends {
        sprint.dates.ends = Some(ends);
    }
    Ok(next)
}

/// Removes a sprint; a name with no match (any casing) is a no-op returning
/// an equal board
pub fn remove_sprint(board: &Board, name: &str) -> Board {
    if get_sprint(board, name).is_none() {
        return board.clone();
    }

    let lowered = name.to_lowercase();
    let mut next = board.clone();
    if let Some(sprints) = next.sprints.as_mut() {
        sprints.retain(|sprint| sprint.name.to_lowercase() != lowered);
    }
    next
}

pub fn active_sprints(board: &Board, now: DateTime<Utc>) -> Vec<Sprint> {
    classify(board, |sprint| sprint.is_active(now))
}

pub fn upcoming_sprints(board: &Board, now: DateTime<Utc>) -> Vec<Sprint> {
    classify(board, |sprint| sprint.is_upcoming(now))
}

pub fn completed_sprints(board: &Board, now: DateTime<Utc>) -> Vec<Sprint> {
    classify(board, |sprint| sprint.is_completed(now))
}

fn classify(board: &Board, predicate: impl Fn(&Sprint) -> bool) -> Vec<Sprint> {
    board
        .sprints
        .as_ref()
        .map(|sprints| sprints.iter().filter(|s| predicate(s)).cloned().collect())
        .unwrap_or_default()
}
