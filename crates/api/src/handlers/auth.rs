//! Handlers for the `/auth` resource (register, login, refresh, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use colist_core::error::CoreError;
use colist_db::models::user::{CreateUser, PublicUser, User};
use colist_db::repositories::{RefreshTokenRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 3, max = 255))]
    pub login: String,
    #[validate(length(min = 6, max = 255))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
}

/// Token pair returned by `POST /auth/refresh`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Response for `GET /auth/me`. `user` is `null` for anonymous callers.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Option<PublicUser>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account. The system category dictionary is copied into the new
/// user's personal scope as part of the same transaction.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.validate()?;

    if UserRepo::find_by_login(&state.pool, &input.login)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with this login already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::register(
        &state.pool,
        &CreateUser {
            name: input.name,
            login: input.login,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    let response = create_auth_response(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
///
/// Authenticate with login + password. Returns access and refresh tokens.
/// Unknown login and wrong password produce the same 401 message.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_login(&state.pool, &input.login)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid login or password".into()))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid login or password".into(),
        )));
    }

    let response = create_auth_response(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/auth/refresh
///
/// Exchange a valid refresh token for a new token pair. Tokens are
/// single-use: the presented token is deleted and replaced in one
/// transaction, so a replayed token gets 401.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<TokenPairResponse>> {
    let old_hash = hash_refresh_token(&input.refresh_token);

    let stored = RefreshTokenRepo::find_valid(&state.pool, &old_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at = Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let rotated = RefreshTokenRepo::rotate(
        &state.pool,
        &old_hash,
        &refresh_hash,
        stored.user_id,
        expires_at,
    )
    .await?;

    if !rotated {
        // Lost a race with a concurrent refresh of the same token.
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        )));
    }

    let access_token = generate_access_token(stored.user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(TokenPairResponse {
        access_token,
        refresh_token: refresh_plaintext,
    }))
}

/// POST /api/auth/logout
///
/// Revoke the presented refresh token. Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<RefreshRequest>,
) -> AppResult<StatusCode> {
    let token_hash = hash_refresh_token(&input.refresh_token);
    RefreshTokenRepo::delete_by_hash(&state.pool, &token_hash).await?;

    tracing::info!(user_id = auth.user_id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/auth/me
///
/// Returns the caller's public identity, or `{ "user": null }` when no
/// valid token is presented.
pub async fn me(
    State(state): State<AppState>,
    OptionalAuthUser(auth): OptionalAuthUser,
) -> AppResult<Json<MeResponse>> {
    let user = match auth {
        Some(auth) => UserRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .map(|u| u.public()),
        None => None,
    };

    Ok(Json(MeResponse { user }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist the refresh token digest, and
/// build the response.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at = Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    RefreshTokenRepo::create(&state.pool, user.id, &refresh_hash, expires_at).await?;

    Ok(AuthResponse {
        user: user.public(),
        access_token,
        refresh_token: refresh_plaintext,
    })
}
