//! Category repository contract and SQLite implementation.

use super::error::{RepoError, RepoResult};
use super::SqliteRepository;
use crate::db::statements::{INSERT_CATEGORY, SELECT_ALL_CATEGORIES};
use crate::db::{StoreRow, Value};
use crate::model::category::{Category, CategoryId};

/// Repository interface for categories. There is no update or delete path.
pub trait CategoryRepository {
    /// Returns every category in store order.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Inserts a category and returns its assigned id. `name` is stored as given.
    fn create_category(&self, name: &str) -> RepoResult<CategoryId>;
}

impl CategoryRepository for SqliteRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let result = self.store().execute(SELECT_ALL_CATEGORIES, &[])?;
        result.rows.iter().map(parse_category_row).collect()
    }

    fn create_category(&self, name: &str) -> RepoResult<CategoryId> {
        let result = self
            .store()
            .execute(INSERT_CATEGORY, &[Value::Text(name.to_string())])?;
        result
            .last_insert_id
            .ok_or(RepoError::MissingInsertId("groups"))
    }
}

fn parse_category_row(row: &StoreRow) -> RepoResult<Category> {
    let id = row.get_i64("id").ok_or_else(|| {
        RepoError::InvalidData("missing or non-integer groups.id".to_string())
    })?;
    Ok(Category {
        id,
        name: row.get_text("name").unwrap_or_default().to_string(),
    })
}
