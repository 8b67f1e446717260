//! Route definitions.

pub mod auth;
pub mod categories;
pub mod health;
pub mod lists;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/...          registration, login, token lifecycle
/// /categories/...    the caller's personal category dictionary
/// /lists/...         lists, items, list-scoped categories, shares
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/lists", lists::router())
}
