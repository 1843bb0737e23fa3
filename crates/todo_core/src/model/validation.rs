//! Form input validation.
//!
//! Validation runs before any store call; a rejected input never reaches
//! SQLite.

use super::category::CategoryId;
use super::task::NewTask;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is empty or whitespace-only.
    EmptyTitle,
    /// No category selected for a new task.
    MissingCategory,
    /// Category name is empty or whitespace-only.
    EmptyCategoryName,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle | Self::MissingCategory => {
                write!(f, "Please enter a title and select a category.")
            }
            Self::EmptyCategoryName => write!(f, "Please enter a category name."),
        }
    }
}

impl Error for ValidationError {}

/// Builds a trimmed [`NewTask`] from raw form fields.
pub fn validate_new_task(
    title: &str,
    description: &str,
    category_id: Option<CategoryId>,
) -> Result<NewTask, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let category_id = category_id.ok_or(ValidationError::MissingCategory)?;

    Ok(NewTask {
        title: title.to_string(),
        description: description.trim().to_string(),
        category_id,
    })
}

/// Returns the trimmed category name.
pub fn validate_category_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyCategoryName);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::{validate_category_name, validate_new_task, ValidationError};

    #[test]
    fn new_task_fields_are_trimmed() {
        let task = validate_new_task("  Draft report ", " notes\n", Some(3)).unwrap();
        assert_eq!(task.title, "Draft report");
        assert_eq!(task.description, "notes");
        assert_eq!(task.category_id, 3);
    }

    #[test]
    fn whitespace_title_is_rejected_before_category_check() {
        assert_eq!(
            validate_new_task(" \t", "", None).unwrap_err(),
            ValidationError::EmptyTitle
        );
        assert_eq!(
            validate_new_task("ok", "", None).unwrap_err(),
            ValidationError::MissingCategory
        );
    }

    #[test]
    fn category_name_must_not_be_blank() {
        assert_eq!(validate_category_name("  Work ").unwrap(), "Work");
        assert_eq!(
            validate_category_name("   ").unwrap_err(),
            ValidationError::EmptyCategoryName
        );
    }
}
