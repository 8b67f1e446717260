//! Category models: one table, two scopes.
//!
//! A category row with `list_id = NULL` is *personal* (usable across all of
//! its owner's lists); a row with `list_id` set is *local* to that one list.
//! Items reference a category through the typed [`CategoryRef`] pair.

use colist_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Scope discriminant stored on list items, matching the Postgres
/// `category_type` enum. `User` marks the list author's personal scope,
/// `Local` a category tied to the list itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "category_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    User,
    Local,
}

/// Typed reference to the category carried by a list item.
///
/// Constructed and destructured only as a pair, so a `category_id` can never
/// be persisted without its `category_type` (or vice versa).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRef {
    /// A category in the list author's personal scope.
    Personal(DbId),
    /// A category local to the list.
    Local(DbId),
}

impl CategoryRef {
    pub fn new(id: DbId, kind: CategoryType) -> Self {
        match kind {
            CategoryType::User => Self::Personal(id),
            CategoryType::Local => Self::Local(id),
        }
    }

    /// Rebuild a reference from the raw column pair. Returns `None` unless
    /// both columns are present.
    pub fn from_columns(id: Option<DbId>, kind: Option<CategoryType>) -> Option<Self> {
        match (id, kind) {
            (Some(id), Some(kind)) => Some(Self::new(id, kind)),
            _ => None,
        }
    }

    /// Split into the `(category_id, category_type)` column pair.
    pub fn into_columns(self) -> (DbId, CategoryType) {
        match self {
            Self::Personal(id) => (id, CategoryType::User),
            Self::Local(id) => (id, CategoryType::Local),
        }
    }

    pub fn id(self) -> DbId {
        self.into_columns().0
    }

    pub fn category_type(self) -> CategoryType {
        self.into_columns().1
    }
}

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub icon: String,
    pub list_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl Category {
    pub fn category_type(&self) -> CategoryType {
        if self.list_id.is_some() {
            CategoryType::Local
        } else {
            CategoryType::User
        }
    }
}

/// Category as returned from the list-scoped listing: tagged with its scope
/// and whether the caller created it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCategory {
    pub id: DbId,
    pub name: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub is_owner: bool,
}

impl ListCategory {
    /// Tag a raw category row for a response to `caller_id`.
    pub fn from_category(cat: &Category, caller_id: DbId) -> Self {
        Self {
            id: cat.id,
            name: cat.name.clone(),
            icon: cat.icon.clone(),
            category_type: cat.category_type(),
            is_owner: cat.user_id == caller_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ref_requires_both_columns() {
        assert_eq!(CategoryRef::from_columns(None, None), None);
        assert_eq!(CategoryRef::from_columns(Some(1), None), None);
        assert_eq!(CategoryRef::from_columns(None, Some(CategoryType::User)), None);
        assert_eq!(
            CategoryRef::from_columns(Some(1), Some(CategoryType::User)),
            Some(CategoryRef::Personal(1))
        );
        assert_eq!(
            CategoryRef::from_columns(Some(2), Some(CategoryType::Local)),
            Some(CategoryRef::Local(2))
        );
    }

    #[test]
    fn test_category_ref_round_trips_columns() {
        let (id, kind) = CategoryRef::Personal(7).into_columns();
        assert_eq!(CategoryRef::new(id, kind), CategoryRef::Personal(7));

        let (id, kind) = CategoryRef::Local(9).into_columns();
        assert_eq!(CategoryRef::new(id, kind), CategoryRef::Local(9));
    }
}
