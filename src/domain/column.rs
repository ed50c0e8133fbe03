use crate::domain::{ids::ColumnId, ordering::Ordered};
use serde::{Deserialize, Serialize};

/// A lane of a kanban board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    pub color: String,
    pub order: usize,
}

impl Column {
    pub fn new(name: impl Into<String>, color: impl Into<String>, order: usize) -> Self {
        Self {
            id: ColumnId::generate(),
            name: name.into(),
            color: color.into(),
            order,
        }
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }
}

impl Ordered for Column {
    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}
