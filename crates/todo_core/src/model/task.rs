//! Task (`todos` table) model.
//!
//! # Invariants
//! - New tasks always start as [`TaskStatus::Pending`].
//! - Status round-trips through its lowercase text form (`pending|completed`).

use super::category::CategoryId;
use serde::{Deserialize, Serialize};

pub type TaskId = i64;

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    /// Text stored in `todos.status`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Returns the opposite status (pending <-> completed).
    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

/// Snapshot of one persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// `None` when the row carries a NULL `groupId`.
    pub category_id: Option<CategoryId>,
}

/// Insert payload for a new task. Status is not part of it: inserts are
/// always pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub category_id: CategoryId,
}

/// Full-edit payload for an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: String,
    pub description: String,
    pub category_id: Option<CategoryId>,
}
