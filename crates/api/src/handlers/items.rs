//! Handlers for list items: CRUD plus manual ordering.

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use colist_core::error::CoreError;
use colist_core::types::DbId;
use colist_db::models::category::{CategoryRef, CategoryType};
use colist_db::models::item::ItemUpdate;
use colist_db::repositories::{CategoryRepo, ItemRepo};
use serde::Deserialize;
use validator::Validate;

use crate::access::require_access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /lists/{id}/items`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 1000))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub category_type: Option<CategoryType>,
}

/// Request body for `PATCH /lists/{id}/items/{item_id}`.
///
/// Only fields present in the request change. `categoryId` is three-state:
/// absent leaves the category alone, `null` clears it (together with its
/// type), and a value re-assigns it.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 1000))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(rename = "is_completed")]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub category_id: Option<Option<DbId>>,
    #[serde(default)]
    pub category_type: Option<Option<CategoryType>>,
}

/// Request body for `PUT /lists/{id}/items/reorder`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderItemsRequest {
    #[validate(length(min = 1))]
    pub item_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/lists/{id}/items
///
/// All items of the list in display order, joined with category fields.
pub async fn get_items(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (list, _role) = require_access(&state.pool, list_id, auth.user_id).await?;

    let items = ItemRepo::list_with_category(&state.pool, list.id).await?;

    Ok(Json(items))
}

/// POST /api/lists/{id}/items
///
/// Append an item at `max(position) + 1`. A category, if supplied, must be
/// a full `(categoryId, categoryType)` pair valid for this list.
pub async fn create_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
    Json(input): Json<CreateItemRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let (list, role) = require_access(&state.pool, list_id, auth.user_id).await?;
    if !role.can_edit() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to add items to this list".into(),
        )));
    }

    let category = resolve_category_pair(input.category_id, input.category_type)?;
    if let Some(category) = category {
        ensure_category_valid(&state, category, list.id, list.author_id).await?;
    }

    let item = ItemRepo::create(
        &state.pool,
        list.id,
        &input.title,
        input.description.as_deref(),
        category,
    )
    .await?;

    tracing::info!(item_id = item.id, list_id, user_id = auth.user_id, "Item created");

    let item = ItemRepo::find_with_category(&state.pool, item.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ListItem",
            id: item.id,
        }))?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/lists/{id}/items/{item_id}
pub async fn update_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateItemRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let (list, role) = require_access(&state.pool, list_id, auth.user_id).await?;
    if !role.can_edit() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to edit items on this list".into(),
        )));
    }

    let item = fetch_list_item(&state, item_id, list.id).await?;

    // Resolve the category change. A re-assignment without an explicit new
    // type revalidates under the item's current type.
    let category = match input.category_id {
        None => item.category_ref(),
        Some(None) => None,
        Some(Some(category_id)) => {
            let kind = input
                .category_type
                .flatten()
                .or(item.category_type)
                .ok_or_else(|| {
                    AppError::Core(CoreError::Validation(
                        "categoryId requires a categoryType".into(),
                    ))
                })?;
            let category = CategoryRef::new(category_id, kind);
            ensure_category_valid(&state, category, list.id, list.author_id).await?;
            Some(category)
        }
    };

    let update = ItemUpdate {
        title: input.title.unwrap_or(item.title),
        description: input.description.or(item.description),
        is_completed: input.is_completed.unwrap_or(item.is_completed),
        category,
    };

    ItemRepo::update(&state.pool, item.id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ListItem",
            id: item_id,
        }))?;

    let item = ItemRepo::find_with_category(&state.pool, item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ListItem",
            id: item_id,
        }))?;

    Ok(Json(item))
}

/// DELETE /api/lists/{id}/items/{item_id}
///
/// Leaves a gap in the position sequence; positions are never compacted.
pub async fn delete_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let (list, role) = require_access(&state.pool, list_id, auth.user_id).await?;
    if !role.can_edit() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to delete items from this list".into(),
        )));
    }

    let item = fetch_list_item(&state, item_id, list.id).await?;

    ItemRepo::delete(&state.pool, item.id).await?;

    tracing::info!(item_id, list_id, user_id = auth.user_id, "Item deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/lists/{id}/items/reorder
///
/// Assign `position = index` for every id in the given order. Any id not
/// belonging to this list is a 404, not a silent skip. The writes are
/// independent per-row updates; overlapping reorders interleave with
/// last-write-per-row semantics.
pub async fn reorder_items(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
    Json(input): Json<ReorderItemsRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let (list, role) = require_access(&state.pool, list_id, auth.user_id).await?;
    if !role.can_edit() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to reorder items on this list".into(),
        )));
    }

    let existing: HashSet<DbId> = ItemRepo::ids_in_list(&state.pool, list.id, &input.item_ids)
        .await?
        .into_iter()
        .collect();

    if let Some(&missing) = input.item_ids.iter().find(|id| !existing.contains(id)) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ListItem",
            id: missing,
        }));
    }

    ItemRepo::reorder(&state.pool, &input.item_ids).await?;

    tracing::info!(
        list_id,
        count = input.item_ids.len(),
        user_id = auth.user_id,
        "Items reordered",
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a [`CategoryRef`] from the request pair, rejecting a half-set pair.
fn resolve_category_pair(
    category_id: Option<DbId>,
    category_type: Option<CategoryType>,
) -> AppResult<Option<CategoryRef>> {
    match (category_id, category_type) {
        (None, None) => Ok(None),
        (Some(id), Some(kind)) => Ok(Some(CategoryRef::new(id, kind))),
        _ => Err(AppError::Core(CoreError::Validation(
            "categoryId and categoryType must be set together".into(),
        ))),
    }
}

/// Reject a category reference that is not assignable on this list.
async fn ensure_category_valid(
    state: &AppState,
    category: CategoryRef,
    list_id: DbId,
    author_id: DbId,
) -> AppResult<()> {
    let valid =
        CategoryRepo::validate_for_list(&state.pool, category, list_id, author_id).await?;
    if !valid {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid category for this list".into(),
        )));
    }
    Ok(())
}

/// Fetch an item and verify it belongs to the list in the request path,
/// guarding against cross-list id reuse.
async fn fetch_list_item(
    state: &AppState,
    item_id: DbId,
    list_id: DbId,
) -> AppResult<colist_db::models::item::ListItem> {
    let item = ItemRepo::find_by_id(&state.pool, item_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ListItem",
            id: item_id,
        }))?;

    if item.list_id != list_id {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ListItem",
            id: item_id,
        }));
    }

    Ok(item)
}
