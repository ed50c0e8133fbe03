use crate::domain::{board::Board, ids::BoardId};
use crate::error::{Result, TaskNestError};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Color scheme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Everything the application persists.
///
/// Missing or `null` top-level fields deserialize to their defaults so older
/// snapshots keep loading. An unreadable preference falls back to its own
/// default instead of failing the whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub boards: Vec<Board>,
    #[serde(default)]
    pub current_board_id: Option<BoardId>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub theme: Theme,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub has_seen_intro: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(value) => value,
        None => return Ok(T::default()),
    };
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            tracing::warn!("Unreadable preference in snapshot, using default: {}", err);
            Ok(T::default())
        }
    }
}

impl AppState {
    pub fn board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| &b.id == id)
    }

    /// Mutable access to a board, failing with `BoardNotFound`
    pub fn board_mut(&mut self, id: &BoardId) -> Result<&mut Board> {
        self.boards
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| TaskNestError::BoardNotFound(id.to_string()))
    }

    /// The selected board, if any
    pub fn current_board(&self) -> Option<&Board> {
        self.current_board_id
            .as_ref()
            .and_then(|id| self.board(id))
    }

    /// Creates an empty board and selects it
    pub fn create_board(&mut self, name: impl Into<String>) -> BoardId {
        let board = Board::new(name);
        let id = board.id.clone();
        self.boards.push(board);
        self.current_board_id = Some(id.clone());
        id
    }

    /// Selects a board; `None` clears the selection
    pub fn select_board(&mut self, id: Option<BoardId>) -> Result<()> {
        if let Some(id) = &id {
            if self.board(id).is_none() {
                return Err(TaskNestError::BoardNotFound(id.to_string()));
            }
        }
        self.current_board_id = id;
        Ok(())
    }

    /// Removes a board and everything on it. Unknown ids are ignored.
    ///
    /// Returns whether a board was removed.
    pub fn delete_board(&mut self, id: &BoardId) -> bool {
        let before = self.boards.len();
        self.boards.retain(|b| &b.id != id);
        if self.current_board_id.as_ref() == Some(id) {
            self.current_board_id = None;
        }
        self.boards.len() != before
    }

    pub fn rename_board(&mut self, id: &BoardId, name: impl Into<String>) -> Result<()> {
        self.board_mut(id)?.rename(name);
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn set_has_seen_intro(&mut self, value: bool) {
        self.has_seen_intro = value;
    }

    pub fn is_consistent(&self) -> bool {
        let selection_ok = match &self.current_board_id {
            Some(id) => self.board(id).is_some(),
            None => true,
        };
        selection_ok && self.boards.iter().all(Board::is_consistent)
    }

    /// Restores every invariant, returning whether anything changed
    pub fn repair(&mut self) -> bool {
        let mut changed = false;
        if let Some(id) = self.current_board_id.clone() {
            if self.board(&id).is_none() {
                self.current_board_id = None;
                changed = true;
            }
        }
        for board in &mut self.boards {
            changed |= board.repair();
        }
        changed
    }
}
