//! Project category reference data.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A server-defined project classification, fetched read-only from
/// `GET /category`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: DbId,
    pub name: String,
}

/// Returns `true` if `id` resolves to a category in `categories`.
pub fn resolves(categories: &[Category], id: DbId) -> bool {
    categories.iter().any(|c| c.id == id)
}
