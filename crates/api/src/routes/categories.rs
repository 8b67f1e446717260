//! Route definitions for the caller's personal category dictionary.
//!
//! ```text
//! GET    /         -> get_my_categories
//! POST   /         -> create_my_category
//! PATCH  /{id}     -> update_my_category
//! DELETE /{id}     -> delete_my_category
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::get_my_categories).post(categories::create_my_category),
        )
        .route(
            "/{id}",
            axum::routing::patch(categories::update_my_category)
                .delete(categories::delete_my_category),
        )
}
