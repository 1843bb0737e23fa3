//! Task list screen state.
//!
//! # Responsibility
//! - Keep a full snapshot of tasks and categories, reloaded on every focus.
//! - Apply the category/status filter to that snapshot.
//! - Toggle status and delete tasks, patching the snapshot on success.
//!
//! # Invariants
//! - `refresh` replaces each half of the snapshot wholesale; no merging.
//! - Status toggle and delete patch only the affected entry.
//! - Failed operations leave the snapshot untouched.

use super::filter::{category_options, filter_tasks, CategoryFilter, CategoryOption, StatusFilter};
use super::ViewError;
use crate::model::category::Category;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::task_repo::TaskRepository;
use log::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct TaskListView {
    tasks: Vec<Task>,
    categories: Vec<Category>,
    category_filter: CategoryFilter,
    status_filter: StatusFilter,
}

impl TaskListView {
    /// Creates an empty list with both filters set to `All`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reloads the snapshot from the store.
    ///
    /// Tasks and categories are read independently: a failed read keeps its
    /// previous half of the snapshot while the other half still refreshes.
    /// The first failure is returned after both reads were attempted.
    pub fn refresh<R>(&mut self, repo: &R) -> Result<(), ViewError>
    where
        R: TaskRepository + CategoryRepository,
    {
        let tasks = repo
            .list_tasks()
            .map_err(|err| ViewError::store("fetch todos", err));
        let categories = repo
            .list_categories()
            .map_err(|err| ViewError::store("fetch categories", err));

        let tasks_error = match tasks {
            Ok(tasks) => {
                self.tasks = tasks;
                None
            }
            Err(err) => Some(err),
        };
        let categories_error = match categories {
            Ok(categories) => {
                self.categories = categories;
                None
            }
            Err(err) => Some(err),
        };

        match tasks_error.or(categories_error) {
            None => {
                info!(
                    "event=list_refresh module=view status=ok tasks={} categories={}",
                    self.tasks.len(),
                    self.categories.len()
                );
                Ok(())
            }
            Some(err) => {
                warn!("event=list_refresh module=view status=error error={err}");
                Err(err)
            }
        }
    }

    /// Reloads only the task half of the snapshot.
    ///
    /// For actions that do not need the category picker, so a failing
    /// category read cannot block them.
    pub fn refresh_tasks<R: TaskRepository>(&mut self, repo: &R) -> Result<(), ViewError> {
        match repo.list_tasks() {
            Ok(tasks) => {
                self.tasks = tasks;
                Ok(())
            }
            Err(err) => {
                warn!("event=list_refresh module=view status=error scope=tasks error={err}");
                Err(ViewError::store("fetch todos", err))
            }
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_filter(&self) -> CategoryFilter {
        self.category_filter
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.category_filter = filter;
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    /// Tasks passing the current filters, in snapshot order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, self.category_filter, self.status_filter)
    }

    pub fn category_options(&self) -> Vec<CategoryOption> {
        category_options(&self.categories)
    }

    /// Flips the status of task `id` and returns the new status.
    ///
    /// # Errors
    /// - [`ViewError::NotInSnapshot`] when the snapshot has no such task;
    ///   no store call is made.
    /// - [`ViewError::NoRowsAffected`] when the row vanished from the store.
    /// - [`ViewError::Store`] when the update fails.
    pub fn toggle_status<R: TaskRepository>(
        &mut self,
        repo: &R,
        id: TaskId,
    ) -> Result<TaskStatus, ViewError> {
        let current = self
            .tasks
            .iter()
            .find(|task| task.id == id)
            .map(|task| task.status)
            .ok_or(ViewError::NotInSnapshot(id))?;
        let next = current.toggled();

        let changed = repo.set_task_status(id, next).map_err(|err| {
            warn!("event=task_toggle module=view status=error task_id={id} error={err}");
            ViewError::store("update status", err)
        })?;
        if changed == 0 {
            warn!("event=task_toggle module=view status=error task_id={id} error_code=no_rows");
            return Err(ViewError::NoRowsAffected(id));
        }

        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.status = next;
        }
        info!(
            "event=task_toggle module=view status=ok task_id={id} new_status={}",
            next.as_str()
        );
        Ok(next)
    }

    /// Deletes task `id` and drops it from the snapshot.
    ///
    /// Returns the number of deleted rows; `0` for an unknown id, which is
    /// not an error.
    pub fn delete_task<R: TaskRepository>(
        &mut self,
        repo: &R,
        id: TaskId,
    ) -> Result<usize, ViewError> {
        let deleted = repo.delete_task(id).map_err(|err| {
            warn!("event=task_delete module=view status=error task_id={id} error={err}");
            ViewError::store("delete todo", err)
        })?;

        self.tasks.retain(|task| task.id != id);
        info!("event=task_delete module=view status=ok task_id={id} deleted={deleted}");
        Ok(deleted)
    }
}
