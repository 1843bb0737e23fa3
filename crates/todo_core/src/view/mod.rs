//! Per-screen view state and the store contracts each screen relies on.
//!
//! # Responsibility
//! - Hold transient snapshots copied out of the store (never the source of truth).
//! - Validate form input before any store call.
//! - Tell the UI layer where to navigate after an operation.
//!
//! # Invariants
//! - A failed operation leaves view state at its last successful snapshot.
//! - Cross-screen consistency comes only from full reloads on focus.

use crate::model::task::TaskId;
use crate::model::validation::ValidationError;
use crate::repo::error::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod create;
pub mod edit;
pub mod filter;
pub mod list;

/// Navigation signal returned to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Remain on the current screen.
    Stay,
    /// Pop back to the task list. `refresh` asks the list to reload even if
    /// the platform would not report a focus change.
    BackToList { refresh: bool },
}

/// Dismissible, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: String,
}

/// Failure of a view operation.
#[derive(Debug)]
pub enum ViewError {
    /// Input rejected before reaching the store.
    Validation(ValidationError),
    /// Store call failed; `action` names the attempted operation.
    Store {
        action: &'static str,
        source: RepoError,
    },
    /// Edit screen opened without a task title.
    MissingTaskKey,
    /// No task matched the edit screen's title key.
    TaskNotFound(String),
    /// Edit screen could not read its task.
    LoadFailed(RepoError),
    /// The list snapshot has no task with this id.
    NotInSnapshot(TaskId),
    /// A write by id matched no row.
    NoRowsAffected(TaskId),
}

impl ViewError {
    pub(crate) fn store(action: &'static str, source: RepoError) -> Self {
        Self::Store { action, source }
    }

    /// Returns whether the screen must close after reporting this error.
    pub fn is_navigation_guard(&self) -> bool {
        matches!(
            self,
            Self::MissingTaskKey | Self::TaskNotFound(_) | Self::LoadFailed(_)
        )
    }

    /// Navigation the UI should perform after showing [`ViewError::notice`].
    pub fn navigation(&self) -> Navigation {
        if self.is_navigation_guard() {
            Navigation::BackToList { refresh: false }
        } else {
            Navigation::Stay
        }
    }

    /// Converts the error into the message shown to the user.
    pub fn notice(&self) -> Notice {
        match self {
            Self::Validation(err) => Notice {
                title: "Validation Error",
                message: err.to_string(),
            },
            Self::Store { action, .. } => Notice {
                title: "Error",
                message: format!("Failed to {action}. Please try again."),
            },
            Self::MissingTaskKey => Notice {
                title: "Error",
                message: "No task title provided for editing.".to_string(),
            },
            Self::TaskNotFound(_) => Notice {
                title: "Error",
                message: "No task found with the provided title.".to_string(),
            },
            Self::LoadFailed(_) => Notice {
                title: "Error",
                message: "Failed to fetch task data. Please try again.".to_string(),
            },
            Self::NotInSnapshot(_) | Self::NoRowsAffected(_) => Notice {
                title: "Error",
                message: "Task no longer exists. Refresh the list and try again.".to_string(),
            },
        }
    }
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "validation failed: {err}"),
            Self::Store { action, source } => write!(f, "failed to {action}: {source}"),
            Self::MissingTaskKey => write!(f, "no task title provided"),
            Self::TaskNotFound(title) => write!(f, "no task titled `{title}`"),
            Self::LoadFailed(err) => write!(f, "failed to load task: {err}"),
            Self::NotInSnapshot(id) => write!(f, "task {id} is not in the list snapshot"),
            Self::NoRowsAffected(id) => write!(f, "task {id} matched no rows"),
        }
    }
}

impl Error for ViewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store { source, .. } => Some(source),
            Self::LoadFailed(err) => Some(err),
            Self::MissingTaskKey
            | Self::TaskNotFound(_)
            | Self::NotInSnapshot(_)
            | Self::NoRowsAffected(_) => None,
        }
    }
}

impl From<ValidationError> for ViewError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Navigation, ViewError};
    use crate::model::validation::ValidationError;

    #[test]
    fn edit_guards_navigate_back_and_other_errors_stay() {
        assert_eq!(
            ViewError::MissingTaskKey.navigation(),
            Navigation::BackToList { refresh: false }
        );
        assert!(ViewError::TaskNotFound("x".to_string()).is_navigation_guard());
        assert_eq!(ViewError::NotInSnapshot(1).navigation(), Navigation::Stay);
    }

    #[test]
    fn validation_notice_uses_validation_title() {
        let notice = ViewError::from(ValidationError::EmptyCategoryName).notice();
        assert_eq!(notice.title, "Validation Error");
        assert_eq!(notice.message, "Please enter a category name.");
    }
}
