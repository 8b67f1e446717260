//! Route definitions for authentication.
//!
//! ```text
//! POST /register    -> register (public)
//! POST /login       -> login (public)
//! POST /refresh     -> refresh (public, token in body)
//! POST /logout      -> logout (requires auth)
//! GET  /me          -> me (optional auth)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}
