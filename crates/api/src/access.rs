//! Per-list access resolution shared by every list-scoped handler.
//!
//! Every read or mutation on a list, its items, its local categories, or its
//! shares goes through one of these helpers before touching anything else.
//! "List does not exist" and "list is not shared with you" both surface as
//! the same 404, so probing ids reveals nothing.

use colist_core::error::CoreError;
use colist_core::types::DbId;
use colist_db::models::list::List;
use colist_db::models::share::ListRole;
use colist_db::repositories::ListRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Fetch the list and require that the caller holds any role on it.
///
/// Returns the list row together with the resolved [`ListRole`] so handlers
/// can make further privilege decisions without a second lookup.
pub async fn require_access(
    pool: &PgPool,
    list_id: DbId,
    user_id: DbId,
) -> AppResult<(List, ListRole)> {
    match ListRepo::find_with_access(pool, list_id, user_id).await? {
        Some((list, Some(role))) => Ok((list, role)),
        _ => Err(not_found(list_id)),
    }
}

/// Fetch the list and require that the caller is its author.
///
/// A caller with editor access gets 403 (the list's existence is already
/// known to them); a caller with no access gets the usual 404.
pub async fn require_owner(pool: &PgPool, list_id: DbId, user_id: DbId) -> AppResult<List> {
    match ListRepo::find_with_access(pool, list_id, user_id).await? {
        Some((list, Some(ListRole::Owner))) => Ok(list),
        Some((_, Some(ListRole::Editor))) => Err(AppError::Core(CoreError::Forbidden(
            "Only the list owner may perform this action".into(),
        ))),
        _ => Err(not_found(list_id)),
    }
}

fn not_found(list_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "List",
        id: list_id,
    })
}
