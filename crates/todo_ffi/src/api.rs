//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one function per screen action to Dart via FRB.
//! - Drive the core view-state types so screen rules live in Rust.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every failure is returned as a user-facing message, never dropped.
//! - One store is opened per process and kept for its lifetime.

use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use todo_core::db::open_db;
use todo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Category, CategoryFilter, CreateTaskView, EditTaskView, Navigation, SqliteRepository,
    StatusFilter, Store, Task, TaskListView, ViewError,
};

const DB_FILE_NAME: &str = "tododb.db";
const DB_PATH_ENV: &str = "TODO_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE: OnceLock<Store> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database file location, typically the app documents directory.
///
/// # FFI contract
/// - Must run before the first data call to take effect.
/// - Returns empty string on success, or an error message when a different
///   path is already in use.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "db path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "database already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Task row as shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// `pending|completed`.
    pub status: String,
    pub category_id: Option<i64>,
}

/// Category picker entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryItem {
    pub id: i64,
    pub name: String,
}

/// Filtered list screen payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    pub ok: bool,
    /// Tasks passing the requested filters.
    pub items: Vec<TodoItem>,
    pub categories: Vec<CategoryItem>,
    /// Human-readable notice; empty on success.
    pub message: String,
}

/// Result of a write action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    pub ok: bool,
    /// Id created by the action, when it creates one.
    pub id: Option<i64>,
    /// Notice title (`Success|Error|Validation Error`).
    pub title: String,
    pub message: String,
    /// Whether the UI should pop back to the list.
    pub navigate_back: bool,
    /// Whether the list must reload when shown again.
    pub refresh_list: bool,
}

impl TodoActionResponse {
    fn success(message: impl Into<String>, id: Option<i64>, navigation: Navigation) -> Self {
        let (navigate_back, refresh_list) = navigation_flags(navigation);
        Self {
            ok: true,
            id,
            title: "Success".to_string(),
            message: message.into(),
            navigate_back,
            refresh_list,
        }
    }

    fn failure(err: &ViewError) -> Self {
        let notice = err.notice();
        let (navigate_back, refresh_list) = navigation_flags(err.navigation());
        Self {
            ok: false,
            id: None,
            title: notice.title.to_string(),
            message: notice.message,
            navigate_back,
            refresh_list,
        }
    }

    fn unavailable(message: String) -> Self {
        Self {
            ok: false,
            id: None,
            title: "Error".to_string(),
            message,
            navigate_back: false,
            refresh_list: false,
        }
    }
}

/// Category picker payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoCategoriesResponse {
    pub ok: bool,
    pub categories: Vec<CategoryItem>,
    /// Human-readable notice; empty on success.
    pub message: String,
}

/// Result of the inline category dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoCategoryCreateResponse {
    pub ok: bool,
    /// Id of the new category; `None` on failure.
    pub id: Option<i64>,
    pub title: String,
    pub message: String,
    /// Picker choices re-read after the insert.
    pub categories: Vec<CategoryItem>,
}

/// Edit form fields of a loaded task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoEditForm {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category_id: Option<i64>,
}

/// Edit screen payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoEditResponse {
    pub ok: bool,
    /// `None` when the task could not be loaded.
    pub form: Option<TodoEditForm>,
    pub categories: Vec<CategoryItem>,
    pub message: String,
    pub navigate_back: bool,
}

/// Reloads the list and applies the category/status filters.
///
/// `status` accepts `all|pending|completed`; `category_id = None` means all.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list(category_id: Option<i64>, status: String) -> TodoListResponse {
    let status_filter = match parse_status_filter(&status) {
        Some(filter) => filter,
        None => return list_failure(format!("unsupported status filter `{}`", status.trim())),
    };
    let category_filter = category_id.map_or(CategoryFilter::All, CategoryFilter::Category);

    let result = with_repo(|repo| {
        let mut view = TaskListView::new();
        let refreshed = view.refresh(&repo);
        view.set_category_filter(category_filter);
        view.set_status_filter(status_filter);
        TodoListResponse {
            ok: refreshed.is_ok(),
            items: view.visible_tasks().into_iter().map(to_todo_item).collect(),
            categories: view.categories().iter().map(to_category_item).collect(),
            message: refreshed.err().map(|err| err.notice().message).unwrap_or_default(),
        }
    });
    result.unwrap_or_else(list_failure)
}

/// Loads the category choices for the new-task form.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_categories() -> TodoCategoriesResponse {
    let result = with_repo(|repo| {
        let mut view = CreateTaskView::new();
        let loaded = view.on_open(&repo);
        TodoCategoriesResponse {
            ok: loaded.is_ok(),
            categories: view.categories().iter().map(to_category_item).collect(),
            message: loaded.err().map(|err| err.notice().message).unwrap_or_default(),
        }
    });
    result.unwrap_or_else(|message| TodoCategoriesResponse {
        ok: false,
        categories: Vec::new(),
        message,
    })
}

/// Creates a task from the new-task form.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_create(
    title: String,
    description: String,
    category_id: Option<i64>,
) -> TodoActionResponse {
    run_action(|repo| {
        let mut view = CreateTaskView::new();
        view.title = title;
        view.description = description;
        view.selected_category = category_id;
        view.submit(&repo).map(|navigation| {
            TodoActionResponse::success("Task added successfully!", None, navigation)
        })
    })
}

/// Creates a category from the inline category dialog.
///
/// The response carries the reloaded picker so the new entry is selectable
/// right away.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_create_category(name: String) -> TodoCategoryCreateResponse {
    let result = with_repo(|repo| {
        let mut view = CreateTaskView::new();
        view.new_category_name = name;
        let created = view.create_category(&repo);
        let categories = view.categories().iter().map(to_category_item).collect();
        match created {
            Ok(id) => TodoCategoryCreateResponse {
                ok: true,
                id: Some(id),
                title: "Success".to_string(),
                message: "Category added successfully!".to_string(),
                categories,
            },
            Err(err) => {
                let notice = err.notice();
                TodoCategoryCreateResponse {
                    ok: false,
                    id: None,
                    title: notice.title.to_string(),
                    message: notice.message,
                    categories,
                }
            }
        }
    });
    result.unwrap_or_else(|message| TodoCategoryCreateResponse {
        ok: false,
        id: None,
        title: "Error".to_string(),
        message,
        categories: Vec::new(),
    })
}

/// Flips a task between pending and completed.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle_status(id: i64) -> TodoActionResponse {
    run_action(|repo| {
        let mut view = TaskListView::new();
        view.refresh_tasks(&repo)?;
        let status = view.toggle_status(&repo, id)?;
        Ok(TodoActionResponse::success(
            format!("Task marked {}.", status.as_str()),
            Some(id),
            Navigation::Stay,
        ))
    })
}

/// Deletes a task by id. Unknown ids succeed as no-ops.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(id: i64) -> TodoActionResponse {
    run_action(|repo| {
        let mut view = TaskListView::new();
        let deleted = view.delete_task(&repo, id)?;
        let message = if deleted == 0 {
            "No task deleted."
        } else {
            "Task deleted."
        };
        Ok(TodoActionResponse::success(message, Some(id), Navigation::Stay))
    })
}

/// Loads the edit form for the task titled `task_title`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_edit_load(task_title: Option<String>) -> TodoEditResponse {
    let result = with_repo(|repo| {
        let mut view = EditTaskView::new();
        match view.on_focus(&repo, task_title.as_deref()) {
            Ok(()) => edit_response(&view, None),
            Err(err) => edit_response(&view, Some(&err)),
        }
    });
    result.unwrap_or_else(|message| TodoEditResponse {
        ok: false,
        form: None,
        categories: Vec::new(),
        message,
        navigate_back: true,
    })
}

/// Saves the edit form for the task originally titled `task_title`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_edit_save(
    task_title: Option<String>,
    title: String,
    description: String,
    category_id: Option<i64>,
) -> TodoActionResponse {
    run_action(|repo| {
        let mut view = EditTaskView::new();
        if let Err(err) = view.on_focus(&repo, task_title.as_deref()) {
            if err.is_navigation_guard() {
                return Err(err);
            }
            // Category reload failures do not block saving the task itself.
            warn!("event=ffi_edit_save module=ffi status=degraded error={err}");
        }
        view.title = title;
        view.description = description;
        view.selected_category = category_id;
        let id = view.loaded_task_id();
        view.save(&repo).map(|navigation| {
            TodoActionResponse::success("Task updated successfully.", id, navigation)
        })
    })
}

fn run_action(
    f: impl FnOnce(SqliteRepository<'static>) -> Result<TodoActionResponse, ViewError>,
) -> TodoActionResponse {
    match with_repo(f) {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => TodoActionResponse::failure(&err),
        Err(message) => TodoActionResponse::unavailable(message),
    }
}

fn with_repo<T>(f: impl FnOnce(SqliteRepository<'static>) -> T) -> Result<T, String> {
    let store = shared_store()?;
    Ok(f(SqliteRepository::new(store)))
}

fn shared_store() -> Result<&'static Store, String> {
    if let Some(store) = STORE.get() {
        return Ok(store);
    }
    let path = resolve_db_path();
    let store = open_db(path).map_err(|err| format!("todo DB open failed: {err}"))?;
    // A racing caller may have installed its store first; either one is fine.
    let _ = STORE.set(store);
    STORE
        .get()
        .ok_or_else(|| "todo DB is unavailable".to_string())
}

fn resolve_db_path() -> &'static PathBuf {
    DB_PATH.get_or_init(|| {
        if let Ok(raw) = std::env::var(DB_PATH_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }
        std::env::temp_dir().join(DB_FILE_NAME)
    })
}

fn parse_status_filter(value: &str) -> Option<StatusFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "all" => Some(StatusFilter::All),
        "pending" => Some(StatusFilter::Pending),
        "completed" => Some(StatusFilter::Completed),
        _ => None,
    }
}

fn navigation_flags(navigation: Navigation) -> (bool, bool) {
    match navigation {
        Navigation::Stay => (false, false),
        Navigation::BackToList { refresh } => (true, refresh),
    }
}

fn list_failure(message: String) -> TodoListResponse {
    TodoListResponse {
        ok: false,
        items: Vec::new(),
        categories: Vec::new(),
        message,
    }
}

fn edit_response(view: &EditTaskView, err: Option<&ViewError>) -> TodoEditResponse {
    let guarded = err.is_some_and(ViewError::is_navigation_guard);
    let form = view
        .loaded_task_id()
        .filter(|_| !guarded)
        .map(|id| TodoEditForm {
            id,
            title: view.title.clone(),
            description: view.description.clone(),
            category_id: view.selected_category,
        });
    TodoEditResponse {
        ok: err.is_none(),
        form,
        categories: view.categories().iter().map(to_category_item).collect(),
        message: err.map(|err| err.notice().message).unwrap_or_default(),
        navigate_back: guarded,
    }
}

fn to_todo_item(task: &Task) -> TodoItem {
    TodoItem {
        id: task.id,
        title: task.title.clone(),
        description: task.description.clone(),
        status: task.status.as_str().to_string(),
        category_id: task.category_id,
    }
}

fn to_category_item(category: &Category) -> CategoryItem {
    CategoryItem {
        id: category.id,
        name: category.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        configure_db_path, core_version, init_logging, ping, resolve_db_path, todo_categories,
        todo_create, todo_create_category, todo_delete, todo_edit_load, todo_edit_save,
        todo_list, todo_toggle_status,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    const TEST_DB_FILE_NAME: &str = "tododb-ffi-tests.db";

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn configure_db_path_rejects_switching_paths() {
        use_test_db();
        let active = resolve_db_path().display().to_string();
        assert!(configure_db_path(active).is_empty());
        assert!(!configure_db_path("/definitely/elsewhere/tododb.db".to_string()).is_empty());
        assert!(!configure_db_path("  ".to_string()).is_empty());
    }

    #[test]
    fn create_list_toggle_and_delete_flow() {
        use_test_db();
        let category = todo_create_category(unique_token("cat"));
        assert!(category.ok, "{}", category.message);
        let category_id = category.id.expect("category id");

        let title = unique_token("task");
        let created = todo_create(
            format!("  {title} "),
            " details ".to_string(),
            Some(category_id),
        );
        assert!(created.ok, "{}", created.message);
        assert!(created.navigate_back && created.refresh_list);

        let listed = todo_list(Some(category_id), "pending".to_string());
        assert!(listed.ok, "{}", listed.message);
        assert_eq!(listed.items.len(), 1);
        let item = &listed.items[0];
        assert_eq!(item.title, title);
        assert_eq!(item.description, "details");
        assert!(listed.categories.iter().any(|c| c.id == category_id));

        let toggled = todo_toggle_status(item.id);
        assert!(toggled.ok, "{}", toggled.message);
        assert!(todo_list(Some(category_id), "pending".to_string()).items.is_empty());
        assert_eq!(todo_list(Some(category_id), "completed".to_string()).items.len(), 1);

        let deleted = todo_delete(item.id);
        assert!(deleted.ok, "{}", deleted.message);
        assert!(todo_list(Some(category_id), "all".to_string()).items.is_empty());
    }

    #[test]
    fn create_rejects_blank_title_with_validation_notice() {
        use_test_db();
        let response = todo_create("   ".to_string(), String::new(), Some(1));
        assert!(!response.ok);
        assert_eq!(response.title, "Validation Error");
        assert!(!response.navigate_back);
    }

    #[test]
    fn list_rejects_unknown_status_filter() {
        use_test_db();
        let response = todo_list(None, "archived".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("archived"));
    }

    #[test]
    fn edit_load_guards_navigate_back() {
        use_test_db();
        let missing = todo_edit_load(None);
        assert!(!missing.ok);
        assert!(missing.navigate_back);

        let unknown = todo_edit_load(Some(unique_token("absent")));
        assert!(!unknown.ok);
        assert!(unknown.navigate_back);
        assert!(unknown.form.is_none());
    }

    #[test]
    fn edit_save_renames_loaded_task() {
        use_test_db();
        let category_id = todo_create_category(unique_token("edit-cat"))
            .id
            .expect("category id");
        let original = unique_token("edit-task");
        assert!(todo_create(original.clone(), String::new(), Some(category_id)).ok);

        let loaded = todo_edit_load(Some(original.clone()));
        assert!(loaded.ok, "{}", loaded.message);
        let form = loaded.form.expect("loaded form");

        let renamed = format!("{original}-renamed");
        let saved = todo_edit_save(
            Some(original.clone()),
            renamed.clone(),
            "edited".to_string(),
            Some(category_id),
        );
        assert!(saved.ok, "{}", saved.message);
        assert_eq!(saved.id, Some(form.id));
        assert!(saved.navigate_back);

        assert!(todo_edit_load(Some(original)).navigate_back);
        let reloaded = todo_edit_load(Some(renamed)).form.expect("renamed form");
        assert_eq!(reloaded.id, form.id);
        assert_eq!(reloaded.description, "edited");
    }

    #[test]
    fn created_category_is_returned_in_refreshed_picker() {
        use_test_db();
        let name = unique_token("picker");

        let created = todo_create_category(format!(" {name} "));
        assert!(created.ok, "{}", created.message);
        let id = created.id.expect("category id");
        assert!(created
            .categories
            .iter()
            .any(|category| category.id == id && category.name == name));

        let picker = todo_categories();
        assert!(picker.ok, "{}", picker.message);
        assert!(picker.message.is_empty());
        assert!(picker.categories.iter().any(|category| category.id == id));
    }

    #[test]
    fn blank_category_name_is_rejected_without_insert() {
        use_test_db();
        let response = todo_create_category("   ".to_string());
        assert!(!response.ok);
        assert_eq!(response.id, None);
        assert_eq!(response.title, "Validation Error");
        assert!(response.categories.is_empty());
    }

    /// Points the process-wide store at a file the CLI never opens.
    fn use_test_db() {
        let path = std::env::temp_dir().join(TEST_DB_FILE_NAME);
        let error = configure_db_path(path.display().to_string());
        assert!(error.is_empty(), "{error}");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
