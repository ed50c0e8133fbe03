use crate::domain::{
    column::Column,
    ids::{BoardId, ColumnId, TaskId},
    ordering,
    tag::Tag,
    task::{Task, TaskUpdate},
};
use crate::error::{Result, TaskNestError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A kanban board: owns its columns and the tasks placed in them.
///
/// Column `order` values are kept contiguous from zero, and so are the task
/// `order` values within each column. Every mutation below either preserves
/// that or fails without touching the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    pub created_at: DateTime<Utc>,
}

/// Task count of a single column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnStat {
    pub column_id: ColumnId,
    pub name: String,
    pub count: usize,
}

/// Overview figures for a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardStats {
    pub total_tasks: usize,
    pub total_columns: usize,
    /// In display order
    pub per_column: Vec<ColumnStat>,
    /// Tasks sitting in the right-most column
    pub completed: usize,
}

impl Board {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BoardId::generate(),
            name: name.into(),
            columns: Vec::new(),
            tasks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Columns left to right
    pub fn sorted_columns(&self) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.order);
        columns
    }

    /// Tasks of a column, top to bottom
    pub fn column_tasks(&self, column_id: &ColumnId) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| &t.column_id == column_id)
            .collect();
        tasks.sort_by_key(|t| t.order);
        tasks
    }

    fn require_column(&self, id: &ColumnId) -> Result<&Column> {
        self.column(id)
            .ok_or_else(|| TaskNestError::ColumnNotFound(id.to_string()))
    }

    fn require_column_mut(&mut self, id: &ColumnId) -> Result<&mut Column> {
        self.columns
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| TaskNestError::ColumnNotFound(id.to_string()))
    }

    fn require_task(&self, id: &TaskId) -> Result<&Task> {
        self.task(id)
            .ok_or_else(|| TaskNestError::TaskNotFound(id.to_string()))
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Appends a column at the right end
    pub fn add_column(&mut self, name: impl Into<String>, color: impl Into<String>) -> ColumnId {
        let column = Column::new(name, color, self.columns.len());
        let id = column.id.clone();
        self.columns.push(column);
        id
    }

    pub fn rename_column(&mut self, column_id: &ColumnId, name: impl Into<String>) -> Result<()> {
        self.require_column_mut(column_id)?.rename(name);
        Ok(())
    }

    pub fn set_column_color(&mut self, column_id: &ColumnId, color: impl Into<String>) -> Result<()> {
        self.require_column_mut(column_id)?.set_color(color);
        Ok(())
    }

    /// Removes a column with all of its tasks and closes the order gap.
    ///
    /// The last remaining column cannot be deleted.
    pub fn delete_column(&mut self, column_id: &ColumnId) -> Result<()> {
        self.require_column(column_id)?;
        if self.columns.len() <= 1 {
            return Err(TaskNestError::LastColumn(self.id.to_string()));
        }

        self.columns.retain(|c| &c.id != column_id);
        self.tasks.retain(|t| &t.column_id != column_id);
        ordering::compact(&mut self.columns);
        Ok(())
    }

    /// Moves a column to `target_index` (clamped), returning where it landed
    pub fn move_column(&mut self, column_id: &ColumnId, target_index: usize) -> Result<usize> {
        self.require_column(column_id)?;

        let (moved, mut rest): (Vec<Column>, Vec<Column>) = std::mem::take(&mut self.columns)
            .into_iter()
            .partition(|c| &c.id == column_id);
        ordering::sort_by_order(&mut rest);

        let mut placed = 0;
        for column in moved {
            placed = ordering::insert_clamped(&mut rest, target_index, column);
        }
        ordering::renumber(&mut rest);
        self.columns = rest;
        Ok(placed)
    }

    /// Appends a task at the bottom of `column_id`
    pub fn add_task(
        &mut self,
        column_id: &ColumnId,
        title: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<Tag>,
    ) -> Result<TaskId> {
        self.require_column(column_id)?;

        let order = self.column_len(column_id);
        let task = Task::new(column_id.clone(), title, description, tags, order);
        let id = task.id.clone();
        self.tasks.push(task);
        Ok(id)
    }

    /// Applies a partial update.
    ///
    /// Content fields are written in place. A `column_id` and/or `order`
    /// relocates the task through [`Board::move_task`]: a new column without an
    /// order appends, an order without a column reorders within the current one.
    pub fn update_task(&mut self, task_id: &TaskId, update: TaskUpdate) -> Result<()> {
        let current = self.require_task(task_id)?;
        let source_column = current.column_id.clone();
        let current_order = current.order;

        let target_column = update
            .column_id
            .clone()
            .unwrap_or_else(|| source_column.clone());
        self.require_column(&target_column)?;

        if let Some(task) = self.tasks.iter_mut().find(|t| &t.id == task_id) {
            update.apply_content(task);
        }

        if update.has_placement() {
            let index = match update.order {
                Some(order) => order,
                None if target_column == source_column => current_order,
                None => usize::MAX,
            };
            self.move_task(task_id, &target_column, index)?;
        }
        Ok(())
    }

    /// Removes a task and renumbers the rest of its column
    pub fn delete_task(&mut self, task_id: &TaskId) -> Result<()> {
        let column_id = self.require_task(task_id)?.column_id.clone();
        self.tasks.retain(|t| &t.id != task_id);
        self.compact_column(&column_id);
        Ok(())
    }

    /// Moves a task to `target_index` of `target_column_id`.
    ///
    /// The target column is rebuilt in display order without the task, the
    /// task is inserted (the index is clamped to the column length) and the
    /// column is renumbered from zero. When the task changes column, the
    /// source column is renumbered as well. Tasks of other columns are left
    /// untouched. Returns the index the task landed at.
    pub fn move_task(
        &mut self,
        task_id: &TaskId,
        target_column_id: &ColumnId,
        target_index: usize,
    ) -> Result<usize> {
        let position = self
            .tasks
            .iter()
            .position(|t| &t.id == task_id)
            .ok_or_else(|| TaskNestError::TaskNotFound(task_id.to_string()))?;
        self.require_column(target_column_id)?;
        let mut moved = self.tasks.remove(position);
        let source_column_id = moved.column_id.clone();

        let (mut target_list, rest): (Vec<Task>, Vec<Task>) = std::mem::take(&mut self.tasks)
            .into_iter()
            .partition(|t| &t.column_id == target_column_id);

        let (mut source_list, others): (Vec<Task>, Vec<Task>) =
            if &source_column_id != target_column_id {
                rest.into_iter()
                    .partition(|t| t.column_id == source_column_id)
            } else {
                (Vec::new(), rest)
            };

        ordering::sort_by_order(&mut target_list);
        moved.column_id = target_column_id.clone();
        let placed = ordering::insert_clamped(&mut target_list, target_index, moved);
        ordering::renumber(&mut target_list);

        ordering::compact(&mut source_list);

        self.tasks = others;
        self.tasks.extend(target_list);
        self.tasks.extend(source_list);
        Ok(placed)
    }

    /// Sends a task to the bottom of another column
    pub fn move_task_to_column_end(
        &mut self,
        task_id: &TaskId,
        column_id: &ColumnId,
    ) -> Result<usize> {
        self.move_task(task_id, column_id, usize::MAX)
    }

    fn column_len(&self, column_id: &ColumnId) -> usize {
        self.tasks
            .iter()
            .filter(|t| &t.column_id == column_id)
            .count()
    }

    fn compact_column(&mut self, column_id: &ColumnId) -> bool {
        let mut members: Vec<&mut Task> = self
            .tasks
            .iter_mut()
            .filter(|t| &t.column_id == column_id)
            .collect();
        ordering::compact(&mut members)
    }

    pub fn stats(&self) -> BoardStats {
        let per_column: Vec<ColumnStat> = self
            .sorted_columns()
            .into_iter()
            .map(|c| ColumnStat {
                column_id: c.id.clone(),
                name: c.name.clone(),
                count: self.column_len(&c.id),
            })
            .collect();
        let completed = per_column.last().map(|s| s.count).unwrap_or(0);

        BoardStats {
            total_tasks: self.tasks.len(),
            total_columns: self.columns.len(),
            per_column,
            completed,
        }
    }

    /// Checks the ordering and ownership invariants
    pub fn is_consistent(&self) -> bool {
        if !ordering::is_contiguous(&self.columns) {
            return false;
        }
        if self.tasks.iter().any(|t| self.column(&t.column_id).is_none()) {
            return false;
        }
        self.columns
            .iter()
            .all(|c| ordering::is_contiguous(self.tasks.iter().filter(|t| t.column_id == c.id)))
    }

    /// Restores the invariants on data of unknown provenance.
    ///
    /// Drops tasks whose column no longer exists or whose id repeats an
    /// earlier task, then renumbers columns and every column's tasks. Returns whether anything changed.
    pub fn repair(&mut self) -> bool {
        let before = self.tasks.len();
        let column_ids: Vec<ColumnId> = self.columns.iter().map(|c| c.id.clone()).collect();
        let mut seen = HashSet::new();
        self.tasks
            .retain(|t| column_ids.contains(&t.column_id) && seen.insert(t.id.clone()));
        let mut changed = self.tasks.len() != before;

        changed |= ordering::compact(&mut self.columns);
        for column_id in &column_ids {
            changed |= self.compact_column(column_id);
        }
        changed
    }
}
