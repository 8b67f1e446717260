//! List item entity model and DTOs.

use colist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::category::{CategoryRef, CategoryType};

/// A row from the `list_items` table.
///
/// The `(category_id, category_type)` pair is written only through
/// [`CategoryRef`], and a CHECK constraint rejects a half-set pair at the
/// schema level.
#[derive(Debug, Clone, FromRow)]
pub struct ListItem {
    pub id: DbId,
    pub list_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub category_id: Option<DbId>,
    pub category_type: Option<CategoryType>,
    pub position: i32,
    pub created_at: Timestamp,
}

impl ListItem {
    /// The item's category reference, if any.
    pub fn category_ref(&self) -> Option<CategoryRef> {
        CategoryRef::from_columns(self.category_id, self.category_type)
    }
}

/// Item joined with its category's display fields, as returned by the API.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemWithCategory {
    pub id: DbId,
    pub list_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub category_id: Option<DbId>,
    pub category_type: Option<CategoryType>,
    pub category_name: Option<String>,
    pub category_icon: Option<String>,
    pub position: i32,
    pub created_at: Timestamp,
}

/// Fully-resolved column values for an item update.
///
/// Handlers merge the partial request into the current row and pass the
/// final values here; the repository writes all columns in one statement.
#[derive(Debug)]
pub struct ItemUpdate {
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub category: Option<CategoryRef>,
}
