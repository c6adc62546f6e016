use crate::{domain::Board, error::Result};
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;

/// Storage boundary for persisting a board document.
///
/// Loading runs the migration chain, so callers always receive a board at
/// the current schema version. Saving stamps `dates.saved` and nothing
/// else; board-level `updated` stamping belongs to the managers.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Creates the board document with default contents if it is missing
    async fn initialize(&self) -> Result<()>;

    /// Checks whether the board document exists
    async fn is_initialized(&self) -> bool;

    /// Loads the board, migrating older documents to the current schema
    async fn load_board(&self) -> Result<Board>;

    /// Saves the board, stamping `dates.saved` immediately before writing
    async fn save_board(&self, board: &Board) -> Result<()>;
}
