//! # Tavla Core
//!
//! Core domain model and board-file logic for Tavla kanban boards.
//!
//! A board is a single human-editable document holding columns, tasks,
//! labels, and sprints. This crate provides the typed document model, the
//! schema migration chain for older documents, and the operations that
//! transform a board as an immutable value, without any dependency on
//! specific UI implementations.

pub mod clock;
pub mod domain;
pub mod error;
pub mod migrate;
pub mod ops;
pub mod storage;

// Re-export commonly used types
pub use clock::{Clock, SystemClock};
pub use domain::{
    board::{Board, BoardDates, Column, Metadata},
    label::Label,
    sprint::{Sprint, SprintDates},
    task::{Task, TaskDates},
};
pub use error::{Result, TavlaError};
pub use migrate::BOARD_VERSION;
pub use storage::Storage;
