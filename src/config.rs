use crate::error::{Result, TaskNestError};
#[cfg(feature = "file-storage")]
use crate::storage::FileStorage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime settings, read from `config.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the snapshot file
    pub data_dir: PathBuf,
    pub file_name: String,
    /// Pretty-print the stored JSON
    pub pretty: bool,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            file_name: "tasknest-data.json".to_string(),
            pretty: true,
            log_level: "warn".to_string(),
        }
    }
}

impl StoreConfig {
    const APP_DIR: &'static str = "tasknest";
    const CONFIG_FILE: &'static str = "config.toml";

    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .unwrap_or_else(|| PathBuf::from(".tasknest"))
    }

    /// Platform config location, e.g. `~/.config/tasknest/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::APP_DIR).join(Self::CONFIG_FILE))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads the config file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|err| {
            TaskNestError::ConfigError(format!("{}: {}", path.display(), err))
        })
    }

    /// Reads the config from its platform location, if there is one
    pub fn load_default() -> Result<Self> {
        match Self::default_config_path() {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }

    #[cfg(feature = "file-storage")]
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
            .with_file_name(self.file_name.clone())
            .with_pretty(self.pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = StoreConfig::from_toml_str("pretty = false\n").unwrap();
        assert!(!config.pretty);
        assert_eq!(config.file_name, "tasknest-data.json");
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig::load(temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/tmp/boards\"\nfile_name = \"kanban.json\"\nlog_level = \"debug\"\n",
        )
        .unwrap();

        let config = StoreConfig::load(&path).unwrap();
        assert_eq!(config.state_path(), PathBuf::from("/tmp/boards/kanban.json"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.file_storage().state_file(), config.state_path());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "pretty = \"sometimes\"").unwrap();

        let err = StoreConfig::load(&path).unwrap_err();
        assert!(matches!(err, TaskNestError::ConfigError(_)));

        let message = err.to_string();
        assert!(message.starts_with("Configuration error: "));
        assert!(message.contains(&path.display().to_string()));
        assert_eq!(message.matches("Configuration error").count(), 1);
    }
}
