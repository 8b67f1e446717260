//! List entity model and response projections.

use colist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::share::ListRole;

/// A row from the `lists` table. `author_id` is the immutable owner.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: DbId,
    pub name: String,
    pub author_id: DbId,
    pub created_at: Timestamp,
}

/// List enriched with aggregate counts and the caller's resolved role.
///
/// Shape of every list returned from `GET /api/lists` and
/// `GET /api/lists/{id}`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummary {
    pub id: DbId,
    pub name: String,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub items_count: i64,
    pub completed_count: i64,
    pub shares_count: i64,
    pub role: ListRole,
}
