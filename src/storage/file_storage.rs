use crate::{
    clock::{Clock, SystemClock},
    domain::{Board, NewBoard, NewTask},
    error::{Result, TavlaError},
    migrate,
    ops::board::{create_board, new_task},
    storage::Storage,
};
use async_trait::async_trait;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::fs;

/// File-based storage for a single board document.
///
/// The document is one human-editable YAML file; `load_board` accepts any
/// schema version the migration chain can reach.
pub struct FileStorage {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl FileStorage {
    /// Creates storage for the given board file path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    /// Creates storage with an injected clock, used to control the
    /// `dates.saved` stamp in tests
    pub fn with_clock(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        if self.is_initialized().await {
            return Ok(());
        }

        let board = create_board(NewBoard::default(), self.clock.as_ref());
        let (board, _) = new_task(
            &board,
            NewTask {
                title: "Welcome to your board".to_string(),
                description: "Add your first task to get started.".to_string(),
                ..NewTask::default()
            },
            self.clock.as_ref(),
        );
        self.save_board(&board).await
    }

    async fn is_initialized(&self) -> bool {
        self.path.exists()
    }

    async fn load_board(&self) -> Result<Board> {
        let contents = fs::read_to_string(&self.path)
            .await
            .map_err(|e| TavlaError::LoadFailure(format!("{}: {}", self.path.display(), e)))?;

        let raw: serde_yaml::Value = serde_yaml::from_str(&contents)
            .map_err(|e| TavlaError::LoadFailure(e.to_string()))?;

        // Migration errors carry their own kinds and pass through as-is
        let migrated = migrate::migrate(&raw)?;

        let board: Board = serde_yaml::from_value(migrated)
            .map_err(|e| TavlaError::LoadFailure(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), "loaded board");
        Ok(board)
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        let mut stamped = board.clone();
        stamped.dates.saved = self.clock.now();

        let contents = serde_yaml::to_string(&stamped)
            .map_err(|e| TavlaError::SaveFailure(e.to_string()))?;

        fs::write(&self.path, contents)
            .await
            .map_err(|e| TavlaError::SaveFailure(format!("{}: {}", self.path.display(), e)))?;

        tracing::debug!(path = %self.path.display(), "saved board");
        Ok(())
    }
}
