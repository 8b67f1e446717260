//! Handlers for list sharing: granting and revoking editor access.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use colist_core::error::CoreError;
use colist_core::types::DbId;
use colist_db::models::share::ShareWithUser;
use colist_db::models::user::PublicUser;
use colist_db::repositories::{ListRepo, ShareRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::access::require_owner;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Fixed ceiling on the number of shares a single list may hold.
const MAX_SHARES: i64 = 50;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /lists/{id}/share`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShareListRequest {
    /// Login of the user to grant editor access to.
    #[validate(length(min = 1, max = 255))]
    pub login: String,
}

/// Response for `GET /lists/{id}/shares`.
#[derive(Debug, Serialize)]
pub struct SharesResponse {
    pub shares: Vec<ShareWithUser>,
    pub author: PublicUser,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/lists/{id}/share
///
/// Owner-only. Grants editor access to the user with the given login.
pub async fn share_list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
    Json(input): Json<ShareListRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let list = require_owner(&state.pool, list_id, auth.user_id).await?;

    let target = UserRepo::find_by_login(&state.pool, &input.login)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "User",
                key: input.login.clone(),
            })
        })?;

    if target.id == auth.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "You cannot share a list with yourself".into(),
        )));
    }

    if ShareRepo::find(&state.pool, list.id, target.id).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "This list is already shared with that user".into(),
        )));
    }

    let count = ShareRepo::count_for_list(&state.pool, list.id).await?;
    if count >= MAX_SHARES {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A list can be shared with at most {MAX_SHARES} users"
        ))));
    }

    let share = ShareRepo::create(&state.pool, list.id, target.id).await?;

    tracing::info!(
        list_id,
        target_id = target.id,
        user_id = auth.user_id,
        "List shared",
    );

    let response = ShareWithUser {
        id: share.id,
        user_id: target.id,
        user_name: target.name,
        user_login: target.login,
        role: share.role,
        created_at: share.created_at,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /api/lists/{id}/share/{user_id}
///
/// Owner-only. The owner cannot be removed through this path.
pub async fn remove_share(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((list_id, target_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let list = require_owner(&state.pool, list_id, auth.user_id).await?;

    if target_id == auth.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "You cannot remove the owner from the list".into(),
        )));
    }

    let removed = ShareRepo::delete(&state.pool, list.id, target_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ListShare",
            id: target_id,
        }));
    }

    tracing::info!(list_id, target_id, user_id = auth.user_id, "Share removed");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/lists/{id}/shares
///
/// Anyone with list access may view the share roster and the author's
/// public identity. Callers with no access get 403 here (the list's
/// existence is already apparent from the share that let them ask).
pub async fn get_list_shares(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (list, role) = ListRepo::find_with_access(&state.pool, list_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "List",
            id: list_id,
        }))?;

    if role.is_none() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this list".into(),
        )));
    }

    let author = UserRepo::find_by_id(&state.pool, list.author_id)
        .await?
        .ok_or_else(|| AppError::InternalError("List author no longer exists".into()))?;

    let shares = ShareRepo::list_with_users(&state.pool, list.id).await?;

    Ok(Json(SharesResponse {
        shares,
        author: author.public(),
    }))
}
