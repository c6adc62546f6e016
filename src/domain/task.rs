use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDates {
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    /// Set when a mutation changes the task's column to a different value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moved: Option<DateTime<Utc>>,
}

/// An identified unit of work
///
/// `id` is assigned once from `metadata.nextId` and never changes. `column`
/// references a board column by name; the task manager does not validate
/// the reference, that is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<f64>,
    /// Lower values are more urgent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
    pub dates: TaskDates,
}

/// Creation delta for a new task.
///
/// The column is always the board's default column, so it is not part of
/// the delta. `created`/`updated` default to the current instant when unset.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub sprint: Option<String>,
    pub labels: Option<Vec<String>>,
    pub story_points: Option<f64>,
    pub priority: Option<f64>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub moved: Option<DateTime<Utc>>,
}

/// Partial task update; absent fields are preserved. `id` and
/// `dates.created` can never be changed through a patch.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub column: Option<String>,
    pub sprint: Option<String>,
    pub labels: Option<Vec<String>>,
    pub story_points: Option<f64>,
    pub priority: Option<f64>,
}
