//! Edit-task form state.
//!
//! # Responsibility
//! - Resolve the navigation title key to one task on every focus.
//! - Persist title/description/category edits for that task.
//!
//! # Invariants
//! - When several tasks share the title key, the lowest id is edited.
//! - Save targets the id resolved at load time, so renaming a task and
//!   saving again keeps editing the same row.
//! - Load failures are navigation guards: the screen reports and closes.

use super::create::{create_category_inline, reload_categories};
use super::{Navigation, ViewError};
use crate::model::category::{Category, CategoryId};
use crate::model::task::{TaskEdit, TaskId};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::task_repo::TaskRepository;
use log::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct EditTaskView {
    pub title: String,
    pub description: String,
    pub selected_category: Option<CategoryId>,
    pub new_category_name: String,
    task_id: Option<TaskId>,
    categories: Vec<Category>,
}

impl EditTaskView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the task titled `task_title` and the category choices.
    ///
    /// # Errors
    /// - [`ViewError::MissingTaskKey`], [`ViewError::TaskNotFound`] and
    ///   [`ViewError::LoadFailed`] are guards; see [`ViewError::navigation`].
    /// - [`ViewError::Store`] when only the category reload fails; the task
    ///   fields stay loaded.
    pub fn on_focus<R>(&mut self, repo: &R, task_title: Option<&str>) -> Result<(), ViewError>
    where
        R: TaskRepository + CategoryRepository,
    {
        let Some(task_title) = task_title else {
            self.task_id = None;
            warn!("event=task_edit_load module=view status=error error_code=missing_key");
            return Err(ViewError::MissingTaskKey);
        };

        let matches = repo.find_tasks_by_title(task_title).map_err(|err| {
            warn!("event=task_edit_load module=view status=error error={err}");
            ViewError::LoadFailed(err)
        })?;
        let match_count = matches.len();
        let Some(task) = matches.into_iter().min_by_key(|task| task.id) else {
            self.task_id = None;
            warn!("event=task_edit_load module=view status=error error_code=not_found");
            return Err(ViewError::TaskNotFound(task_title.to_string()));
        };
        if match_count > 1 {
            warn!(
                "event=task_edit_load module=view status=ambiguous matches={match_count} task_id={}",
                task.id
            );
        }

        self.task_id = Some(task.id);
        self.title = task.title;
        self.description = task.description;
        self.selected_category = task.category_id;
        info!("event=task_edit_load module=view status=ok task_id={}", task.id);

        reload_categories(repo, &mut self.categories)
    }

    /// Id of the task resolved by the last successful load.
    pub fn loaded_task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Writes the current fields to the loaded task.
    ///
    /// Fields are stored as entered; there is no trimming or validation.
    pub fn save<R: TaskRepository>(&self, repo: &R) -> Result<Navigation, ViewError> {
        let id = self.task_id.ok_or(ViewError::MissingTaskKey)?;
        let edit = TaskEdit {
            title: self.title.clone(),
            description: self.description.clone(),
            category_id: self.selected_category,
        };

        let changed = repo.update_task(id, &edit).map_err(|err| {
            warn!("event=task_edit_save module=view status=error task_id={id} error={err}");
            ViewError::store("edit task", err)
        })?;
        if changed == 0 {
            warn!("event=task_edit_save module=view status=error task_id={id} error_code=no_rows");
            return Err(ViewError::NoRowsAffected(id));
        }

        info!("event=task_edit_save module=view status=ok task_id={id}");
        Ok(Navigation::BackToList { refresh: false })
    }

    /// Inserts `new_category_name` as a category and reloads the choices.
    pub fn create_category<R: CategoryRepository>(
        &mut self,
        repo: &R,
    ) -> Result<CategoryId, ViewError> {
        create_category_inline(repo, &mut self.new_category_name, &mut self.categories)
    }
}
