//! Label manager: CRUD over the board's tag set. All name comparisons are
//! case-insensitive.

use crate::clock::Clock;
use crate::domain::{Board, Label, LabelPatch};
use crate::error::{Entity, Result, TavlaError};

pub fn get_label<'a>(board: &'a Board, name: &str) -> Option<&'a Label> {
    let name = name.to_lowercase();
    board
        .labels
        .as_ref()?
        .iter()
        .find(|label| label.name.to_lowercase() == name)
}

/// Adds a label, creating the collection on first use
pub fn add_label(board: &Board, label: Label, clock: &dyn Clock) -> Result<Board> {
    if get_label(board, &label.name).is_some() {
        return Err(TavlaError::DuplicateName {
            entity: Entity::Label,
            name: label.name,
        });
    }

    let mut next = board.clone();
    next.labels.get_or_insert_with(Vec::new).push(label);
    next.dates.updated = clock.now();
    Ok(next)
}

pub fn update_label(
    board: &Board,
    name: &str,
    patch: LabelPatch,
    clock: &dyn Clock,
) -> Result<Board> {
    let not_found = || TavlaError::NotFound {
        entity: Entity::Label,
        key: name.to_string(),
    };
    let lowered = name.to_lowercase();

    let mut next = board.clone();
    let labels = next.labels.as_mut().ok_or_else(not_found)?;
    let index = labels
        .iter()
        .position(|label| label.name.to_lowercase() == lowered)
        .ok_or_else(not_found)?;

    if let Some(new_name) = patch.name {
        labels[index].name = new_name;
    }
    if let Some(color) = patch.color {
        labels[index].color = Some(color);
    }
    next.dates.updated = clock.now();
    Ok(next)
}

/// Removes a label; a name with no match (any casing) is a no-op returning
/// an equal board
pub fn remove_label(board: &Board, name: &str, clock: &dyn Clock) -> Board {
    if get_label(board, name).is_none() {
        return board.clone();
    }

    let lowered = name.to_lowercase();
    let mut next = board.clone();
    if let Some(labels) = next.labels.as_mut() {
        labels.retain(|label| label.name.to_lowercase() != lowered);
    }
    next.dates.updated = clock.now();
    next
}

/// Finds labels by name or color.
///
/// Queries starting with `#`, `rgb(`, or `hsl(` (case-insensitive) match
/// each label's color exactly; every other query is a case-insensitive
/// substring match on names, so the empty query matches every label.
pub fn find_labels(board: &Board, query: &str) -> Vec<Label> {
    let Some(labels) = board.labels.as_ref() else {
        return Vec::new();
    };
    let query = query.to_lowercase();
    let color_query =
        query.starts_with('#') || query.starts_with("rgb(") || query.starts_with("hsl(");

    labels
        .iter()
        .filter(|label| {
            if color_query {
                label
                    .color
                    .as_ref()
                    .is_some_and(|color| color.to_lowercase() == query)
            } else {
                label.name.to_lowercase().contains(&query)
            }
        })
        .cloned()
        .collect()
}
