pub mod board;
pub mod label;
pub mod sorting;
pub mod sprint;
pub mod task;

pub use board::{Board, BoardDates, Column, ColumnPatch, Metadata, NewBoard};
pub use label::{Label, LabelPatch};
pub use sorting::sort_tasks;
pub use sprint::{NewSprint, Sprint, SprintDates, SprintDatesPatch, SprintPatch};
pub use task::{NewTask, Task, TaskDates, TaskPatch};
