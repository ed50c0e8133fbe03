use crate::{domain::AppState, error::Result};
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// Storage trait for persisting the application state snapshot
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves the full state snapshot
    async fn save_state(&self, state: &AppState) -> Result<()>;

    /// Loads the stored snapshot, `None` when nothing has been saved yet
    async fn load_state(&self) -> Result<Option<AppState>>;

    /// Checks if the backend has been initialized
    async fn is_initialized(&self) -> bool;
}

/// Serializes a snapshot into the persisted blob format
pub fn encode_state(state: &AppState, pretty: bool) -> Result<String> {
    let blob = if pretty {
        serde_json::to_string_pretty(state)?
    } else {
        serde_json::to_string(state)?
    };
    Ok(blob)
}

/// Parses a persisted blob
pub fn decode_state(blob: &str) -> Result<AppState> {
    Ok(serde_json::from_str(blob)?)
}

/// Loads the stored snapshot, falling back to the default state.
///
/// Read and parse failures are logged, never returned. A loaded snapshot
/// whose ordering has drifted is repaired before use.
pub async fn load_or_default(storage: &dyn Storage) -> AppState {
    load_repaired_or_default(storage).await.0
}

/// Same as [`load_or_default`], also reporting whether the loaded snapshot
/// had to be repaired and so differs from what is stored.
pub async fn load_repaired_or_default(storage: &dyn Storage) -> (AppState, bool) {
    match storage.load_state().await {
        Ok(Some(mut state)) => {
            let repaired = state.repair();
            if repaired {
                tracing::warn!("Stored state violated ordering invariants; repaired on load");
            }
            tracing::info!("Loaded state with {} board(s)", state.boards.len());
            (state, repaired)
        }
        Ok(None) => {
            tracing::info!("No stored state found, starting empty");
            (AppState::default(), false)
        }
        Err(err) => {
            tracing::warn!("Failed to load stored state, using defaults: {}", err);
            (AppState::default(), false)
        }
    }
}

/// Persists a snapshot, logging instead of returning failures.
///
/// Returns whether the write succeeded.
pub async fn save_or_log(storage: &dyn Storage, state: &AppState) -> bool {
    match storage.save_state(state).await {
        Ok(()) => true,
        Err(err) => {
            tracing::error!("Failed to save state: {}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Theme;

    #[tokio::test]
    async fn test_load_or_default_on_empty_storage() {
        let storage = MemoryStorage::new();
        let state = load_or_default(&storage).await;
        assert_eq!(state, AppState::default());
    }

    #[tokio::test]
    async fn test_load_or_default_on_corrupt_blob() {
        let storage = MemoryStorage::with_blob("{ not json");
        let state = load_or_default(&storage).await;
        assert_eq!(state, AppState::default());
    }

    #[tokio::test]
    async fn test_load_legacy_blob_without_theme() {
        let storage = MemoryStorage::with_blob(r#"{"boards": [], "currentBoardId": null}"#);
        let state = load_or_default(&storage).await;
        assert_eq!(state.theme, Theme::Light);
        assert!(!state.has_seen_intro);
    }

    #[tokio::test]
    async fn test_load_repairs_dangling_selection() {
        let storage = MemoryStorage::with_blob(r#"{"boards": [], "currentBoardId": "gone"}"#);
        let state = load_or_default(&storage).await;
        assert!(state.current_board_id.is_none());
    }

    #[tokio::test]
    async fn test_load_reports_repair() {
        let storage = MemoryStorage::with_blob(r#"{"boards": [], "currentBoardId": "gone"}"#);
        let (_, repaired) = load_repaired_or_default(&storage).await;
        assert!(repaired);

        let storage = MemoryStorage::with_blob(r#"{"boards": [], "currentBoardId": null}"#);
        let (_, repaired) = load_repaired_or_default(&storage).await;
        assert!(!repaired);

        let (_, repaired) = load_repaired_or_default(&MemoryStorage::new()).await;
        assert!(!repaired);
    }

    #[tokio::test]
    async fn test_save_or_log_reports_failure() {
        let storage = MemoryStorage::new();
        let mut state = AppState::default();
        state.create_board("Work");

        assert!(save_or_log(&storage, &state).await);

        storage.set_fail_writes(true);
        state.create_board("Home");
        assert!(!save_or_log(&storage, &state).await);

        let stored = storage.load_state().await.unwrap().unwrap();
        assert_eq!(stored.boards.len(), 1);
    }

    #[test]
    fn test_encode_uses_camel_case_keys() {
        let blob = encode_state(&AppState::default(), false).unwrap();
        assert_eq!(
            blob,
            r#"{"boards":[],"currentBoardId":null,"theme":"light","hasSeenIntro":false}"#
        );
        assert_eq!(decode_state(&blob).unwrap(), AppState::default());
    }
}
