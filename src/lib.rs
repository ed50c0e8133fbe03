//! # TaskNest Core
//!
//! State store and ordering logic for a single-user, local kanban board.
//!
//! Boards own columns and tasks; tasks are kept contiguously ordered within
//! each column as they are added, edited, deleted and moved. The full state
//! is persisted as one JSON snapshot through a pluggable [`Storage`] backend,
//! without any dependency on a specific UI.

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::StoreConfig;
pub use domain::{
    board::{Board, BoardStats, ColumnStat},
    column::Column,
    ids::{BoardId, ColumnId, TagId, TaskId},
    state::{AppState, Theme},
    tag::Tag,
    task::{Task, TaskUpdate},
};
pub use error::{Result, TaskNestError};
pub use storage::Storage;
pub use store::DataStore;
