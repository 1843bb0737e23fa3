//! Every SQL statement the application issues.
//!
//! Positional `?` parameters are bound in the listed column order.

pub const SELECT_ALL_CATEGORIES: &str = "SELECT * FROM groups";
pub const SELECT_ALL_TASKS: &str = "SELECT * FROM todos";
pub const SELECT_TASKS_BY_TITLE: &str = "SELECT * FROM todos WHERE title = ?";

pub const INSERT_CATEGORY: &str = "INSERT INTO groups (name) VALUES (?)";
pub const INSERT_TASK: &str =
    "INSERT INTO todos (title, description, status, groupId) VALUES (?, ?, ?, ?)";

pub const UPDATE_TASK_STATUS: &str = "UPDATE todos SET status = ? WHERE id = ?";
/// Matches every row sharing the title, not just one.
pub const UPDATE_TASK_BY_TITLE: &str =
    "UPDATE todos SET title = ?, description = ?, groupId = ? WHERE title = ?";
pub const UPDATE_TASK_BY_ID: &str =
    "UPDATE todos SET title = ?, description = ?, groupId = ? WHERE id = ?";

pub const DELETE_TASK: &str = "DELETE FROM todos WHERE id = ?";
