//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define the task/category records copied out of the store.
//! - Define input validation shared by the create and edit screens.
//!
//! # Invariants
//! - Ids are assigned by SQLite (`AUTOINCREMENT`) and never reused.
//! - Categories are never updated or deleted.

pub mod category;
pub mod task;
pub mod validation;
