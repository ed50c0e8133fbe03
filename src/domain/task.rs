use crate::domain::{
    ids::{ColumnId, TagId, TaskId},
    ordering::Ordered,
    tag::Tag,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A kanban task card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub column_id: ColumnId,
    pub order: usize,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task placed at `order` within `column_id`
    pub fn new(
        column_id: ColumnId,
        title: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<Tag>,
        order: usize,
    ) -> Self {
        Self {
            id: TaskId::generate(),
            title: title.into(),
            description: description.into(),
            tags,
            column_id,
            order,
            created_at: Utc::now(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replaces the whole tag list
    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tags = tags;
    }

    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Removes a tag, returning it if it was attached
    pub fn remove_tag(&mut self, id: &TagId) -> Option<Tag> {
        let pos = self.tags.iter().position(|t| &t.id == id)?;
        Some(self.tags.remove(pos))
    }

    pub fn has_tag_label(&self, label: &str) -> bool {
        self.tags.iter().any(|t| t.label.eq_ignore_ascii_case(label))
    }
}

impl Ordered for Task {
    fn order(&self) -> usize {
        self.order
    }

    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

/// Partial update of a task; `None` fields are left untouched.
///
/// `column_id` and `order` describe a placement and are applied by the board
/// through the move algorithm, never written directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<Tag>>,
    pub column_id: Option<ColumnId>,
    pub order: Option<usize>,
}

impl TaskUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn column(mut self, column_id: ColumnId) -> Self {
        self.column_id = Some(column_id);
        self
    }

    pub fn order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    /// True when the update relocates the task
    pub fn has_placement(&self) -> bool {
        self.column_id.is_some() || self.order.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Writes title, description and tags onto `task`
    pub(crate) fn apply_content(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.set_title(title.clone());
        }
        if let Some(description) = &self.description {
            task.set_description(description.clone());
        }
        if let Some(tags) = &self.tags {
            task.set_tags(tags.clone());
        }
    }
}
