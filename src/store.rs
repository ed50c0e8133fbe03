//! The data store: single owner of the application state.
//!
//! Every mutation is computed on a copy of the current snapshot. Only a
//! mutation that succeeds replaces the snapshot, which is then persisted
//! (best effort) and published to subscribers. A failed mutation leaves the
//! snapshot, the stored blob and subscribers untouched.
//!
//! Mutating methods take `&mut self`, so one store accepts one mutation at a
//! time. Hosts that share a store across tasks wrap it in a single
//! `tokio::sync::Mutex`.

use crate::{
    domain::{
        AppState, BoardId, BoardStats, ColumnId, Tag, TaskId, TaskUpdate, Theme,
    },
    error::{Result, TaskNestError},
    storage::{self, Storage},
};
use std::sync::Arc;
use tokio::sync::watch;

pub struct DataStore {
    storage: Arc<dyn Storage>,
    state: Arc<AppState>,
    changes: watch::Sender<Arc<AppState>>,
}

impl DataStore {
    /// Opens the store, rehydrating state from `storage`.
    ///
    /// Never fails: unreadable or missing data yields the default state. A
    /// snapshot that needed repair is written back straight away.
    pub async fn open(storage: Arc<dyn Storage>) -> Self {
        if let Err(err) = storage.initialize().await {
            tracing::warn!("Storage initialization failed: {}", err);
        }
        let (state, repaired) = storage::load_repaired_or_default(storage.as_ref()).await;
        if repaired {
            storage::save_or_log(storage.as_ref(), &state).await;
        }
        Self::with_state(storage, state)
    }

    /// Wraps an existing state without reading storage
    pub fn with_state(storage: Arc<dyn Storage>, state: AppState) -> Self {
        let state = Arc::new(state);
        let (changes, _) = watch::channel(Arc::clone(&state));
        Self {
            storage,
            state,
            changes,
        }
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Receives every committed snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<AppState>> {
        self.changes.subscribe()
    }

    /// Writes the current snapshot to storage. Returns whether it succeeded.
    pub async fn flush(&self) -> bool {
        storage::save_or_log(self.storage.as_ref(), &self.state).await
    }

    async fn commit<T>(&mut self, op: impl FnOnce(&mut AppState) -> Result<T>) -> Result<T> {
        let mut next = AppState::clone(&self.state);
        let value = op(&mut next)?;

        self.state = Arc::new(next);
        self.flush().await;
        self.changes.send_replace(Arc::clone(&self.state));
        Ok(value)
    }

    // Boards

    pub async fn create_board(&mut self, name: impl Into<String>) -> Result<BoardId> {
        let name = name.into();
        let id = self.commit(|state| Ok(state.create_board(name))).await?;
        tracing::debug!("Created board {}", id);
        Ok(id)
    }

    pub async fn select_board(&mut self, id: Option<BoardId>) -> Result<()> {
        self.commit(|state| state.select_board(id)).await
    }

    /// Deletes a board; unknown ids are a no-op returning `false`
    pub async fn delete_board(&mut self, id: &BoardId) -> Result<bool> {
        if self.state.board(id).is_none() {
            return Ok(false);
        }
        let removed = self.commit(|state| Ok(state.delete_board(id))).await?;
        tracing::debug!("Deleted board {}", id);
        Ok(removed)
    }

    pub async fn rename_board(&mut self, id: &BoardId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.commit(|state| state.rename_board(id, name)).await
    }

    pub fn current_board_stats(&self) -> Option<BoardStats> {
        self.state.current_board().map(|board| board.stats())
    }

    // Columns

    pub async fn add_column(
        &mut self,
        board_id: &BoardId,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<ColumnId> {
        let (name, color) = (name.into(), color.into());
        self.commit(|state| Ok(state.board_mut(board_id)?.add_column(name, color)))
            .await
    }

    pub async fn rename_column(
        &mut self,
        board_id: &BoardId,
        column_id: &ColumnId,
        name: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        self.commit(|state| state.board_mut(board_id)?.rename_column(column_id, name))
            .await
    }

    pub async fn set_column_color(
        &mut self,
        board_id: &BoardId,
        column_id: &ColumnId,
        color: impl Into<String>,
    ) -> Result<()> {
        let color = color.into();
        self.commit(|state| state.board_mut(board_id)?.set_column_color(column_id, color))
            .await
    }

    pub async fn delete_column(&mut self, board_id: &BoardId, column_id: &ColumnId) -> Result<()> {
        let result = self
            .commit(|state| state.board_mut(board_id)?.delete_column(column_id))
            .await;
        if let Err(TaskNestError::LastColumn(_)) = &result {
            tracing::info!("Refused to delete last column {} of board {}", column_id, board_id);
        }
        result
    }

    pub async fn move_column(
        &mut self,
        board_id: &BoardId,
        column_id: &ColumnId,
        target_index: usize,
    ) -> Result<usize> {
        self.commit(|state| state.board_mut(board_id)?.move_column(column_id, target_index))
            .await
    }

    // Tasks

    pub async fn add_task(
        &mut self,
        board_id: &BoardId,
        column_id: &ColumnId,
        title: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<Tag>,
    ) -> Result<TaskId> {
        let (title, description) = (title.into(), description.into());
        self.commit(|state| {
            state
                .board_mut(board_id)?
                .add_task(column_id, title, description, tags)
        })
        .await
    }

    pub async fn update_task(
        &mut self,
        board_id: &BoardId,
        task_id: &TaskId,
        update: TaskUpdate,
    ) -> Result<()> {
        self.commit(|state| state.board_mut(board_id)?.update_task(task_id, update))
            .await
    }

    pub async fn delete_task(&mut self, board_id: &BoardId, task_id: &TaskId) -> Result<()> {
        self.commit(|state| state.board_mut(board_id)?.delete_task(task_id))
            .await
    }

    /// Drops a task at `target_index` of `target_column_id`; see
    /// [`crate::domain::Board::move_task`]
    pub async fn move_task(
        &mut self,
        board_id: &BoardId,
        task_id: &TaskId,
        target_column_id: &ColumnId,
        target_index: usize,
    ) -> Result<usize> {
        let placed = self
            .commit(|state| {
                state
                    .board_mut(board_id)?
                    .move_task(task_id, target_column_id, target_index)
            })
            .await?;
        tracing::debug!(
            "Moved task {} to column {} at {}",
            task_id,
            target_column_id,
            placed
        );
        Ok(placed)
    }

    pub async fn move_task_to_column_end(
        &mut self,
        board_id: &BoardId,
        task_id: &TaskId,
        column_id: &ColumnId,
    ) -> Result<usize> {
        self.commit(|state| {
            state
                .board_mut(board_id)?
                .move_task_to_column_end(task_id, column_id)
        })
        .await
    }

    // Preferences

    pub async fn toggle_theme(&mut self) -> Result<Theme> {
        self.commit(|state| Ok(state.toggle_theme())).await
    }

    pub async fn set_has_seen_intro(&mut self, value: bool) -> Result<()> {
        self.commit(|state| {
            state.set_has_seen_intro(value);
            Ok(())
        })
        .await
    }
}
