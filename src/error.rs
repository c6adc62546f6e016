use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TavlaError>;

/// The kind of board entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Column,
    Label,
    Sprint,
    Task,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column => write!(f, "Column"),
            Self::Label => write!(f, "Label"),
            Self::Sprint => write!(f, "Sprint"),
            Self::Task => write!(f, "Task"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TavlaError {
    #[error("invalid board document")]
    InvalidDocument,

    #[error("missing version information in board document")]
    MissingVersion,

    #[error("no migration path found for version: {0}")]
    NoMigrationPath(String),

    #[error("{entity} with name \"{name}\" already exists")]
    DuplicateName { entity: Entity, name: String },

    #[error("{entity} \"{key}\" not found")]
    NotFound { entity: Entity, key: String },

    #[error("cannot remove column \"{name}\" because it contains {tasks} task(s)")]
    ColumnNotEmpty { name: String, tasks: usize },

    #[error("invalid position {position}: must be between 0 and {max}")]
    InvalidPosition { position: usize, max: usize },

    #[error("failed to load board file: {0}")]
    LoadFailure(String),

    #[error("failed to save board file: {0}")]
    SaveFailure(String),
}
