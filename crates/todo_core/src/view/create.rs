//! New-task form state.
//!
//! # Invariants
//! - Blank titles and missing categories never reach the store.
//! - A failed submit keeps every form field for retry.
//! - Creating a category never changes the current selection.

use super::{Navigation, ViewError};
use crate::model::category::{Category, CategoryId};
use crate::model::validation::{validate_category_name, validate_new_task};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::task_repo::TaskRepository;
use log::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct CreateTaskView {
    pub title: String,
    pub description: String,
    pub selected_category: Option<CategoryId>,
    /// Input of the inline "new category" dialog.
    pub new_category_name: String,
    categories: Vec<Category>,
}

impl CreateTaskView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the category choices shown when the form opens.
    pub fn on_open<R: CategoryRepository>(&mut self, repo: &R) -> Result<(), ViewError> {
        reload_categories(repo, &mut self.categories)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Validates and inserts the task as pending.
    ///
    /// On success the form is cleared and the list is asked to refresh.
    pub fn submit<R: TaskRepository>(&mut self, repo: &R) -> Result<Navigation, ViewError> {
        let task = validate_new_task(&self.title, &self.description, self.selected_category)?;

        let id = repo.create_task(&task).map_err(|err| {
            warn!("event=task_create module=view status=error error={err}");
            ViewError::store("add task", err)
        })?;

        self.title.clear();
        self.description.clear();
        self.selected_category = None;
        info!(
            "event=task_create module=view status=ok task_id={id} category_id={}",
            task.category_id
        );
        Ok(Navigation::BackToList { refresh: true })
    }

    /// Inserts `new_category_name` as a category and reloads the choices.
    ///
    /// The category stays persisted even when the follow-up reload fails.
    pub fn create_category<R: CategoryRepository>(
        &mut self,
        repo: &R,
    ) -> Result<CategoryId, ViewError> {
        create_category_inline(repo, &mut self.new_category_name, &mut self.categories)
    }
}

pub(crate) fn create_category_inline<R: CategoryRepository>(
    repo: &R,
    name_input: &mut String,
    categories: &mut Vec<Category>,
) -> Result<CategoryId, ViewError> {
    let name = validate_category_name(name_input)?;

    let id = repo.create_category(name).map_err(|err| {
        warn!("event=category_create module=view status=error error={err}");
        ViewError::store("add category", err)
    })?;
    info!("event=category_create module=view status=ok category_id={id}");

    name_input.clear();
    reload_categories(repo, categories)?;
    Ok(id)
}

pub(crate) fn reload_categories<R: CategoryRepository>(
    repo: &R,
    categories: &mut Vec<Category>,
) -> Result<(), ViewError> {
    *categories = repo
        .list_categories()
        .map_err(|err| ViewError::store("fetch categories", err))?;
    Ok(())
}
