use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintDates {
    pub created: DateTime<Utc>,
    pub starts: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends: Option<DateTime<Utc>>,
}

/// A named, time-boxed iteration.
///
/// Names are unique within a board, compared case-insensitively.
/// Classification (active/upcoming/completed) is derived from the dates
/// against a supplied instant, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    pub dates: SprintDates,
}

impl Sprint {
    /// Started and not yet past its end; open-ended sprints stay active
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.dates.starts <= now && self.dates.ends.map_or(true, |ends| ends >= now)
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.dates.starts > now
    }

    /// Open-ended sprints (no `ends`) are never completed
    pub fn is_completed(&self, now: DateTime<Utc>) -> bool {
        self.dates.ends.is_some_and(|ends| ends < now)
    }
}

/// Creation delta for a new sprint; `created` and `starts` default to the
/// current instant when unset
#[derive(Debug, Clone, Default)]
pub struct NewSprint {
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<u32>,
    pub created: Option<DateTime<Utc>>,
    pub starts: Option<DateTime<Utc>>,
    pub ends: Option<DateTime<Utc>>,
}

/// Partial sprint update; absent fields are preserved and the dates patch
/// merges field-by-field rather than replacing the block wholesale
#[derive(Debug, Clone, Default)]
pub struct SprintPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<u32>,
    pub dates: SprintDatesPatch,
}

#[derive(Debug, Clone, Default)]
pub struct SprintDatesPatch {
    pub created: Option<DateTime<Utc>>,
    pub starts: Option<DateTime<Utc>>,
    pub ends: Option<DateTime<Utc>>,
}
