//! Core logic for the to-do list app.
//! This crate owns the local store and every screen's data contract.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod view;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, QueryResult, Store, StoreOptions};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryId};
pub use model::task::{NewTask, Task, TaskEdit, TaskId, TaskStatus};
pub use model::validation::ValidationError;
pub use repo::category_repo::CategoryRepository;
pub use repo::error::{RepoError, RepoResult};
pub use repo::task_repo::TaskRepository;
pub use repo::SqliteRepository;
pub use view::create::CreateTaskView;
pub use view::edit::EditTaskView;
pub use view::filter::{CategoryFilter, CategoryOption, StatusFilter};
pub use view::list::TaskListView;
pub use view::{Navigation, Notice, ViewError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
