//! Handlers for the `/lists` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use colist_core::error::CoreError;
use colist_core::types::DbId;
use colist_db::repositories::ListRepo;
use serde::Deserialize;
use validator::Validate;

use crate::access::{require_access, require_owner};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /lists`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateListRequest {
    #[validate(length(min = 1, max = 500))]
    pub name: String,
}

/// Request body for `PATCH /lists/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateListRequest {
    #[validate(length(min = 1, max = 500))]
    pub name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/lists
///
/// Create a list; the caller becomes its owner.
pub async fn create_list(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateListRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let list = ListRepo::create(&state.pool, auth.user_id, &input.name).await?;

    tracing::info!(list_id = list.id, user_id = auth.user_id, "List created");

    Ok((StatusCode::CREATED, Json(list)))
}

/// GET /api/lists
///
/// All lists the caller owns or has been granted access to, each with
/// item/share counts and the caller's role.
pub async fn get_lists(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let lists = ListRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(lists))
}

/// GET /api/lists/{id}
pub async fn get_list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_access(&state.pool, list_id, auth.user_id).await?;

    let summary = ListRepo::find_summary(&state.pool, list_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "List",
            id: list_id,
        }))?;

    Ok(Json(summary))
}

/// PATCH /api/lists/{id}
///
/// Rename a list. Owners and editors may rename.
pub async fn update_list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
    Json(input): Json<UpdateListRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let (list, role) = require_access(&state.pool, list_id, auth.user_id).await?;
    if !role.can_edit() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to edit this list".into(),
        )));
    }

    let updated = ListRepo::update_name(&state.pool, list.id, &input.name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "List",
            id: list_id,
        }))?;

    tracing::info!(list_id, user_id = auth.user_id, "List renamed");

    Ok(Json(updated))
}

/// DELETE /api/lists/{id}
///
/// Owner only. Items, shares, and local categories cascade away.
pub async fn delete_list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let list = require_owner(&state.pool, list_id, auth.user_id).await?;

    ListRepo::delete(&state.pool, list.id).await?;

    tracing::info!(list_id, user_id = auth.user_id, "List deleted");

    Ok(StatusCode::NO_CONTENT)
}
