use crate::domain::label::Label;
use crate::domain::sprint::Sprint;
use crate::domain::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A workflow stage on the board.
///
/// Position is implicit in the board's column order; names are unique
/// (case-sensitive) within a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
}

impl Column {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

/// Partial column update; absent fields are preserved
#[derive(Debug, Clone, Default)]
pub struct ColumnPatch {
    pub name: Option<String>,
}

/// Board bookkeeping carried inside the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Next task ID to allocate; strictly greater than every existing ID
    pub next_id: u64,
    /// Schema version of the persisted document
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDates {
    pub created: DateTime<Utc>,
    /// Refreshed by every mutation that changes a nested collection
    pub updated: DateTime<Utc>,
    /// Stamped by the persistence layer immediately before writing
    pub saved: DateTime<Utc>,
}

/// The aggregate board document
///
/// Managers never mutate a `Board` in place; every operation takes a
/// reference and returns a wholly new value, so callers holding an older
/// board see no interference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: BTreeMap<u64, Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprints: Option<Vec<Sprint>>,
    pub metadata: Metadata,
    pub dates: BoardDates,
}

/// Seed data for a fresh board; unset fields fall back to the defaults
/// applied by `ops::board::create_board`
#[derive(Debug, Clone, Default)]
pub struct NewBoard {
    pub name: Option<String>,
    pub description: Option<String>,
    pub columns: Option<Vec<Column>>,
    pub tasks: Option<BTreeMap<u64, Task>>,
    pub labels: Option<Vec<Label>>,
    pub sprints: Option<Vec<Sprint>>,
}
