//! Typed repositories over the store's statement surface.
//!
//! # Responsibility
//! - Bind domain values to the statements in [`crate::db::statements`].
//! - Parse materialized rows into [`crate::model`] records.
//!
//! # Invariants
//! - Every read and write goes through [`Store::execute`].
//! - Read paths reject malformed persisted rows instead of masking them.

use crate::db::Store;

pub mod category_repo;
pub mod error;
pub mod task_repo;

/// SQLite-backed implementation of every repository trait.
#[derive(Clone, Copy)]
pub struct SqliteRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'store Store {
        self.store
    }
}
