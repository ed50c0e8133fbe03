use crate::{
    domain::AppState,
    error::Result,
    storage::{decode_state, encode_state, Storage},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage keeping the whole snapshot in one JSON file
#[derive(Debug, Clone)]
pub struct FileStorage {
    root_path: PathBuf,
    file_name: String,
    pretty: bool,
}

impl FileStorage {
    pub const DEFAULT_FILE_NAME: &'static str = "tasknest-data.json";

    /// Creates a new FileStorage instance rooted at `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root_path: data_dir.as_ref().to_path_buf(),
            file_name: Self::DEFAULT_FILE_NAME.to_string(),
            pretty: true,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn state_file(&self) -> PathBuf {
        self.root_path.join(&self.file_name)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Writes to a temp file in the same directory, then renames it over the
    /// target so a crash never leaves a half-written snapshot behind.
    async fn write_atomic(&self, data: &[u8]) -> Result<()> {
        let target = self.state_file();
        let temp_file = tempfile::NamedTempFile::new_in(&self.root_path)?;
        let temp_path = temp_file.path().to_path_buf();

        fs::write(&temp_path, data).await?;
        fs::rename(&temp_path, &target).await?;

        tracing::debug!("Atomically wrote {} bytes to {}", data.len(), target.display());
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await
    }

    async fn save_state(&self, state: &AppState) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = encode_state(state, self.pretty)?;
        self.write_atomic(json.as_bytes()).await
    }

    async fn load_state(&self) -> Result<Option<AppState>> {
        let state_file = self.state_file();

        if !state_file.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&state_file).await?;
        tracing::debug!("Read {} bytes from {}", contents.len(), state_file.display());
        decode_state(&contents).map(Some)
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists()
    }
}
