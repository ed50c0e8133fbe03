use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskNestError>;

#[derive(Debug, Error)]
pub enum TaskNestError {
    #[error("Board not found: {0}")]
    BoardNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Cannot delete the last column of board {0}")]
    LastColumn(String),

    #[error("Invalid identifier: {0:?}")]
    InvalidId(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<toml::de::Error> for TaskNestError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl TaskNestError {
    /// True for the "unknown id" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BoardNotFound(_) | Self::ColumnNotFound(_) | Self::TaskNotFound(_)
        )
    }
}
