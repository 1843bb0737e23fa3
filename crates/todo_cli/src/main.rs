//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `todo_core` linkage and open a store outside the mobile runtime.
//! - Print a deterministic summary of the list screen.
//!
//! Usage: `todo_cli [DB_PATH]`. Without an argument the path comes from
//! `TODO_DB_PATH`, falling back to `tododb.db` in the temp directory.

use std::path::PathBuf;
use std::process::ExitCode;
use todo_core::{open_db, SqliteRepository, TaskListView, TaskStatus};

fn main() -> ExitCode {
    println!("todo_core ping={}", todo_core::ping());
    println!("todo_core version={}", todo_core::core_version());

    let path = db_path();
    let store = match open_db(&path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to open `{}`: {err}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let repo = SqliteRepository::new(&store);
    let mut view = TaskListView::new();
    if let Err(err) = view.refresh(&repo) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let completed = view
        .tasks()
        .iter()
        .filter(|task| task.status == TaskStatus::Completed)
        .count();
    println!("db={}", path.display());
    println!(
        "categories={} tasks={} completed={}",
        view.categories().len(),
        view.tasks().len(),
        completed
    );
    ExitCode::SUCCESS
}

fn db_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("TODO_DB_PATH")
                .filter(|raw| !raw.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| std::env::temp_dir().join("tododb.db"))
}
