use crate::{
    domain::AppState,
    error::{Result, TaskNestError},
    storage::{decode_state, encode_state, Storage},
};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

/// In-process storage holding the serialized blob, like a browser's local
/// storage slot. Writes can be made to fail to simulate a full quota.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an already stored blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// The raw stored blob
    pub fn blob(&self) -> Option<String> {
        self.blob.lock().ok().and_then(|guard| guard.clone())
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock_error() -> TaskNestError {
        TaskNestError::StorageError("memory storage lock poisoned".to_string())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn save_state(&self, state: &AppState) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TaskNestError::StorageError("quota exceeded".to_string()));
        }

        let encoded = encode_state(state, false)?;
        let mut blob = self.blob.lock().map_err(|_| Self::lock_error())?;
        tracing::debug!("Stored {} bytes in memory", encoded.len());
        *blob = Some(encoded);
        Ok(())
    }

    async fn load_state(&self) -> Result<Option<AppState>> {
        let blob = self.blob.lock().map_err(|_| Self::lock_error())?.clone();
        blob.as_deref().map(decode_state).transpose()
    }

    async fn is_initialized(&self) -> bool {
        true
    }
}
