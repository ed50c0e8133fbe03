pub mod board;
pub mod column;
pub mod ids;
pub mod ordering;
pub mod state;
pub mod tag;
pub mod task;

pub use board::{Board, BoardStats, ColumnStat};
pub use column::Column;
pub use ids::{BoardId, ColumnId, TagId, TaskId};
pub use ordering::Ordered;
pub use state::{AppState, Theme};
pub use tag::{ColorPreset, Tag, COLUMN_COLORS, DEFAULT_COLUMN_COLOR, TAG_COLORS};
pub use task::{Task, TaskUpdate};
