//! Task repository contract and SQLite implementation.
//!
//! # Invariants
//! - Inserts always persist status `pending`.
//! - Writes report the number of affected rows; zero is not an error here,
//!   callers decide what a no-op means.
//! - Reads skip rows that do not parse as a task and log them; one bad row
//!   never hides the rest of the table.

use super::error::{RepoError, RepoResult};
use super::SqliteRepository;
use crate::db::statements::{
    DELETE_TASK, INSERT_TASK, SELECT_ALL_TASKS, SELECT_TASKS_BY_TITLE, UPDATE_TASK_BY_ID,
    UPDATE_TASK_BY_TITLE, UPDATE_TASK_STATUS,
};
use crate::db::{StoreRow, Value};
use crate::model::category::CategoryId;
use crate::model::task::{NewTask, Task, TaskEdit, TaskId, TaskStatus};
use log::warn;

/// Repository interface for task reads and writes.
pub trait TaskRepository {
    /// Returns every readable task in store order.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Returns every task whose title equals `title` exactly.
    fn find_tasks_by_title(&self, title: &str) -> RepoResult<Vec<Task>>;
    /// Inserts a pending task and returns its assigned id.
    fn create_task(&self, task: &NewTask) -> RepoResult<TaskId>;
    fn set_task_status(&self, id: TaskId, status: TaskStatus) -> RepoResult<usize>;
    fn update_task(&self, id: TaskId, edit: &TaskEdit) -> RepoResult<usize>;
    /// Applies `edit` to every row titled `title_key`.
    fn update_task_by_title(&self, title_key: &str, edit: &TaskEdit) -> RepoResult<usize>;
    fn delete_task(&self, id: TaskId) -> RepoResult<usize>;
}

impl TaskRepository for SqliteRepository<'_> {
    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let result = self.store().execute(SELECT_ALL_TASKS, &[])?;
        Ok(parse_task_rows(&result.rows, "list"))
    }

    fn find_tasks_by_title(&self, title: &str) -> RepoResult<Vec<Task>> {
        let result = self
            .store()
            .execute(SELECT_TASKS_BY_TITLE, &[Value::Text(title.to_string())])?;
        Ok(parse_task_rows(&result.rows, "find_by_title"))
    }

    fn create_task(&self, task: &NewTask) -> RepoResult<TaskId> {
        let result = self.store().execute(
            INSERT_TASK,
            &[
                Value::Text(task.title.clone()),
                Value::Text(task.description.clone()),
                Value::Text(TaskStatus::Pending.as_str().to_string()),
                Value::Integer(task.category_id),
            ],
        )?;
        result
            .last_insert_id
            .ok_or(RepoError::MissingInsertId("todos"))
    }

    fn set_task_status(&self, id: TaskId, status: TaskStatus) -> RepoResult<usize> {
        let result = self.store().execute(
            UPDATE_TASK_STATUS,
            &[Value::Text(status.as_str().to_string()), Value::Integer(id)],
        )?;
        Ok(result.rows_affected)
    }

    fn update_task(&self, id: TaskId, edit: &TaskEdit) -> RepoResult<usize> {
        let mut params = edit_params(edit);
        params.push(Value::Integer(id));
        let result = self.store().execute(UPDATE_TASK_BY_ID, &params)?;
        Ok(result.rows_affected)
    }

    fn update_task_by_title(&self, title_key: &str, edit: &TaskEdit) -> RepoResult<usize> {
        let mut params = edit_params(edit);
        params.push(Value::Text(title_key.to_string()));
        let result = self.store().execute(UPDATE_TASK_BY_TITLE, &params)?;
        Ok(result.rows_affected)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<usize> {
        let result = self.store().execute(DELETE_TASK, &[Value::Integer(id)])?;
        Ok(result.rows_affected)
    }
}

fn edit_params(edit: &TaskEdit) -> Vec<Value> {
    vec![
        Value::Text(edit.title.clone()),
        Value::Text(edit.description.clone()),
        category_value(edit.category_id),
    ]
}

fn category_value(category_id: Option<CategoryId>) -> Value {
    category_id.map_or(Value::Null, Value::Integer)
}

fn parse_task_rows(rows: &[StoreRow], query: &str) -> Vec<Task> {
    rows.iter()
        .filter_map(|row| match parse_task_row(row) {
            Ok(task) => Some(task),
            Err(err) => {
                warn!(
                    "event=task_read module=repo status=invalid_row query={query} task_id={} error={err}",
                    row.get_i64("id").map_or_else(|| "unknown".to_string(), |id| id.to_string())
                );
                None
            }
        })
        .collect()
}

fn parse_task_row(row: &StoreRow) -> RepoResult<Task> {
    let id = row.get_i64("id").ok_or_else(|| {
        RepoError::InvalidData("missing or non-integer todos.id".to_string())
    })?;

    let status = match row.get("status") {
        Some(Value::Text(value)) => TaskStatus::parse(value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid task status `{value}` in todos.status"))
        })?,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid task status {other:?} in todos.status"
            )));
        }
    };

    let category_id = match row.get("groupId") {
        Some(Value::Integer(value)) => Some(*value),
        Some(Value::Null) | None => None,
        Some(other) => {
            return Err(RepoError::InvalidData(format!(
                "invalid group reference {other:?} in todos.groupId"
            )));
        }
    };

    Ok(Task {
        id,
        title: row.get_text("title").unwrap_or_default().to_string(),
        description: row.get_text("description").unwrap_or_default().to_string(),
        status,
        category_id,
    })
}
