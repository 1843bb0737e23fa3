//! Category (`groups` table) model.

use serde::{Deserialize, Serialize};

pub type CategoryId = i64;

/// Named label that tasks attach to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
