//! Handlers for categories: the caller's personal dictionary, plus the
//! list-scoped operations (visible union, local creation, promotion and
//! import of local categories).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use colist_core::error::CoreError;
use colist_core::types::DbId;
use colist_db::models::category::ListCategory;
use colist_db::repositories::CategoryRepo;
use serde::Deserialize;
use validator::Validate;

use crate::access::{require_access, require_owner};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /categories` and `POST /lists/{id}/categories/local`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub icon: String,
}

/// Request body for `PATCH /categories/{id}`. Only present fields change.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub icon: Option<String>,
}

// ---------------------------------------------------------------------------
// Personal dictionary
// ---------------------------------------------------------------------------

/// GET /api/categories
///
/// The caller's personal categories, ordered by name.
pub async fn get_my_categories(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_personal(&state.pool, auth.user_id).await?;

    Ok(Json(categories))
}

/// POST /api/categories
pub async fn create_my_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    ensure_personal_name_free(&state, auth.user_id, &input.name).await?;

    let category =
        CategoryRepo::create_personal(&state.pool, auth.user_id, &input.name, &input.icon).await?;

    tracing::info!(category_id = category.id, user_id = auth.user_id, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

/// PATCH /api/categories/{id}
///
/// Rename or re-icon one of the caller's personal categories.
pub async fn update_my_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
    Json(input): Json<UpdateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let category = CategoryRepo::find_personal(&state.pool, category_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;

    if let Some(name) = &input.name {
        if *name != category.name {
            ensure_personal_name_free(&state, auth.user_id, name).await?;
        }
    }

    let updated = CategoryRepo::update(
        &state.pool,
        category.id,
        input.name.as_deref(),
        input.icon.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Category",
        id: category_id,
    }))?;

    Ok(Json(updated))
}

/// DELETE /api/categories/{id}
///
/// Items carrying the category fall back to no category.
pub async fn delete_my_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_personal(&state.pool, category_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;

    CategoryRepo::delete(&state.pool, category.id).await?;

    tracing::info!(category_id, user_id = auth.user_id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// List-scoped operations
// ---------------------------------------------------------------------------

/// GET /api/lists/{id}/categories
///
/// The categories assignable within this list: the owner's personal
/// dictionary plus the list's local categories, each tagged with its scope
/// and whether the caller created it.
pub async fn get_list_categories(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (list, _role) = require_access(&state.pool, list_id, auth.user_id).await?;

    let categories = CategoryRepo::list_for_list(&state.pool, list.id, list.author_id).await?;
    let categories: Vec<ListCategory> = categories
        .iter()
        .map(|cat| ListCategory::from_category(cat, auth.user_id))
        .collect();

    Ok(Json(categories))
}

/// POST /api/lists/{id}/categories/local
///
/// For the list owner this creates a *personal* category (owners never need
/// local ones); for a collaborator it creates a category local to the list.
pub async fn create_list_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(list_id): Path<DbId>,
    Json(input): Json<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let (list, _role) = require_access(&state.pool, list_id, auth.user_id).await?;

    let category = if list.author_id == auth.user_id {
        ensure_personal_name_free(&state, auth.user_id, &input.name).await?;
        CategoryRepo::create_personal(&state.pool, auth.user_id, &input.name, &input.icon).await?
    } else {
        if CategoryRepo::find_local_by_name(&state.pool, list.id, &input.name)
            .await?
            .is_some()
        {
            return Err(AppError::Core(CoreError::Conflict(
                "A local category with this name already exists on this list".into(),
            )));
        }
        CategoryRepo::create_local(&state.pool, auth.user_id, list.id, &input.name, &input.icon)
            .await?
    };

    tracing::info!(
        category_id = category.id,
        list_id,
        user_id = auth.user_id,
        "List category created",
    );

    Ok((
        StatusCode::CREATED,
        Json(ListCategory::from_category(&category, auth.user_id)),
    ))
}

/// DELETE /api/lists/{id}/categories/local/{category_id}
///
/// Permitted for the local category's creator and the list owner.
pub async fn delete_local_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((list_id, category_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let (list, _role) = require_access(&state.pool, list_id, auth.user_id).await?;

    let category = CategoryRepo::find_local(&state.pool, category_id, list.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;

    if category.user_id != auth.user_id && list.author_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to delete this category".into(),
        )));
    }

    CategoryRepo::delete(&state.pool, category.id).await?;

    tracing::info!(category_id, list_id, user_id = auth.user_id, "Local category deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/lists/{id}/categories/local/{category_id}/save-to-user
///
/// Copy a local category into the caller's own personal scope. The local
/// row is left untouched, so each collaborator can save it independently.
pub async fn save_local_to_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((list_id, category_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let (list, _role) = require_access(&state.pool, list_id, auth.user_id).await?;

    let local = CategoryRepo::find_local(&state.pool, category_id, list.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;

    ensure_personal_name_free(&state, auth.user_id, &local.name).await?;

    let category =
        CategoryRepo::create_personal(&state.pool, auth.user_id, &local.name, &local.icon).await?;

    tracing::info!(
        category_id = category.id,
        source_id = local.id,
        user_id = auth.user_id,
        "Local category saved to personal scope",
    );

    Ok((StatusCode::CREATED, Json(category)))
}

/// POST /api/lists/{id}/categories/local/{category_id}/import-to-owner
///
/// Owner-only: copy a collaborator's local category into the owner's
/// personal scope. The local row is left untouched.
pub async fn import_local_to_owner(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((list_id, category_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let list = require_owner(&state.pool, list_id, auth.user_id).await?;

    let local = CategoryRepo::find_local(&state.pool, category_id, list.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;

    ensure_personal_name_free(&state, auth.user_id, &local.name).await?;

    let category =
        CategoryRepo::create_personal(&state.pool, auth.user_id, &local.name, &local.icon).await?;

    tracing::info!(
        category_id = category.id,
        source_id = local.id,
        user_id = auth.user_id,
        "Local category imported to owner",
    );

    Ok((StatusCode::CREATED, Json(category)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject with 409 if the user already has a personal category of this name.
async fn ensure_personal_name_free(
    state: &AppState,
    user_id: DbId,
    name: &str,
) -> AppResult<()> {
    if CategoryRepo::find_personal_by_name(&state.pool, user_id, name)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "You already have a personal category named '{name}'"
        ))));
    }
    Ok(())
}
