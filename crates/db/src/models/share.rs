//! List share entity model and the access role enum.

use colist_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The caller's resolved relationship to a list.
///
/// `Owner` is implicit from `lists.author_id` and is never stored as a share
/// row; only `Editor` grants are persisted in `list_shares`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "list_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListRole {
    Owner,
    Editor,
}

impl ListRole {
    /// Whether this role may mutate the list's items and local categories.
    pub fn can_edit(self) -> bool {
        matches!(self, Self::Owner | Self::Editor)
    }
}

/// A row from the `list_shares` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListShare {
    pub id: DbId,
    pub list_id: DbId,
    pub user_id: DbId,
    pub role: ListRole,
    pub created_at: Timestamp,
}

/// Share row joined with the grantee's identity, for the shares listing.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareWithUser {
    pub id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub user_login: String,
    pub role: ListRole,
    pub created_at: Timestamp,
}
