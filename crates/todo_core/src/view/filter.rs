//! Client-side list filtering.
//!
//! Filters never become SQL predicates; they narrow an in-memory snapshot.

use crate::model::category::{Category, CategoryId};
use crate::model::task::{Task, TaskStatus};

/// Category dimension of the list filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(CategoryId),
}

impl CategoryFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => task.category_id == Some(id),
        }
    }
}

/// Status dimension of the list filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => task.status == TaskStatus::Pending,
            Self::Completed => task.status == TaskStatus::Completed,
        }
    }
}

/// One entry of the category picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub label: String,
    pub value: CategoryFilter,
}

/// Returns snapshot entries passing both filters, in snapshot order.
pub fn filter_tasks(
    tasks: &[Task],
    category: CategoryFilter,
    status: StatusFilter,
) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| category.matches(task) && status.matches(task))
        .collect()
}

/// Picker options: `All` followed by each category in store order.
pub fn category_options(categories: &[Category]) -> Vec<CategoryOption> {
    std::iter::once(CategoryOption {
        label: "All".to_string(),
        value: CategoryFilter::All,
    })
    .chain(categories.iter().map(|category| CategoryOption {
        label: category.name.clone(),
        value: CategoryFilter::Category(category.id),
    }))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{category_options, filter_tasks, CategoryFilter, StatusFilter};
    use crate::model::category::Category;
    use crate::model::task::{Task, TaskStatus};

    fn task(id: i64, category_id: Option<i64>, status: TaskStatus) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: String::new(),
            status,
            category_id,
        }
    }

    fn mixed_snapshot() -> Vec<Task> {
        vec![
            task(1, Some(1), TaskStatus::Pending),
            task(2, Some(1), TaskStatus::Completed),
            task(3, Some(2), TaskStatus::Pending),
            task(4, Some(2), TaskStatus::Completed),
            task(5, None, TaskStatus::Pending),
            task(6, Some(3), TaskStatus::Completed),
        ]
    }

    #[test]
    fn filter_matches_brute_force_for_every_combination() {
        let snapshot = mixed_snapshot();
        let categories = [
            CategoryFilter::All,
            CategoryFilter::Category(1),
            CategoryFilter::Category(2),
            CategoryFilter::Category(3),
            CategoryFilter::Category(99),
        ];
        let statuses = [StatusFilter::All, StatusFilter::Pending, StatusFilter::Completed];

        for category in categories {
            for status in statuses {
                let expected: Vec<i64> = snapshot
                    .iter()
                    .filter(|t| match category {
                        CategoryFilter::All => true,
                        CategoryFilter::Category(id) => t.category_id == Some(id),
                    })
                    .filter(|t| match status {
                        StatusFilter::All => true,
                        StatusFilter::Pending => t.status == TaskStatus::Pending,
                        StatusFilter::Completed => t.status == TaskStatus::Completed,
                    })
                    .map(|t| t.id)
                    .collect();
                let actual: Vec<i64> = filter_tasks(&snapshot, category, status)
                    .into_iter()
                    .map(|t| t.id)
                    .collect();
                assert_eq!(actual, expected, "category={category:?} status={status:?}");
            }
        }
    }

    #[test]
    fn defaults_show_everything_including_uncategorized() {
        let snapshot = mixed_snapshot();
        let visible = filter_tasks(&snapshot, CategoryFilter::default(), StatusFilter::default());
        assert_eq!(visible.len(), snapshot.len());
    }

    #[test]
    fn completed_in_category_two() {
        let snapshot = mixed_snapshot();
        let visible = filter_tasks(&snapshot, CategoryFilter::Category(2), StatusFilter::Completed);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 4);
    }

    #[test]
    fn category_options_start_with_all() {
        let options = category_options(&[
            Category {
                id: 7,
                name: "Work".to_string(),
            },
            Category {
                id: 9,
                name: "Home".to_string(),
            },
        ]);
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["All", "Work", "Home"]);
        assert_eq!(options[0].value, CategoryFilter::All);
        assert_eq!(options[2].value, CategoryFilter::Category(9));
    }
}
