//! Board operations.
//!
//! Every mutation takes a board by reference and returns a wholly new
//! board value; callers holding the previous value never observe the
//! change. Mutations in `column`, `label`, and `task` stamp the board's
//! `dates.updated` themselves; sprint mutations are stamped by the
//! wrappers in `board`.

pub mod board;
pub mod column;
pub mod label;
pub mod sprint;
pub mod task;
