//! Route definitions for lists and everything scoped under a list.
//!
//! ```text
//! POST   /                                                  -> create_list
//! GET    /                                                  -> get_lists
//! GET    /{id}                                              -> get_list
//! PATCH  /{id}                                              -> update_list
//! DELETE /{id}                                              -> delete_list (owner)
//!
//! GET    /{id}/items                                        -> get_items
//! POST   /{id}/items                                        -> create_item
//! PUT    /{id}/items/reorder                                -> reorder_items
//! PATCH  /{id}/items/{item_id}                              -> update_item
//! DELETE /{id}/items/{item_id}                              -> delete_item
//!
//! GET    /{id}/categories                                   -> get_list_categories
//! POST   /{id}/categories/local                             -> create_list_category
//! DELETE /{id}/categories/local/{category_id}               -> delete_local_category
//! POST   /{id}/categories/local/{category_id}/save-to-user  -> save_local_to_user
//! POST   /{id}/categories/local/{category_id}/import-to-owner -> import_local_to_owner (owner)
//!
//! POST   /{id}/share                                        -> share_list (owner)
//! DELETE /{id}/share/{user_id}                              -> remove_share (owner)
//! GET    /{id}/shares                                       -> get_list_shares
//! ```

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{categories, items, lists, shares};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(lists::create_list).get(lists::get_lists))
        .route(
            "/{id}",
            get(lists::get_list)
                .patch(lists::update_list)
                .delete(lists::delete_list),
        )
        .route("/{id}/items", get(items::get_items).post(items::create_item))
        .route("/{id}/items/reorder", put(items::reorder_items))
        .route(
            "/{id}/items/{item_id}",
            axum::routing::patch(items::update_item).delete(items::delete_item),
        )
        .route("/{id}/categories", get(categories::get_list_categories))
        .route("/{id}/categories/local", post(categories::create_list_category))
        .route(
            "/{id}/categories/local/{category_id}",
            delete(categories::delete_local_category),
        )
        .route(
            "/{id}/categories/local/{category_id}/save-to-user",
            post(categories::save_local_to_user),
        )
        .route(
            "/{id}/categories/local/{category_id}/import-to-owner",
            post(categories::import_local_to_owner),
        )
        .route("/{id}/share", post(shares::share_list))
        .route("/{id}/share/{user_id}", delete(shares::remove_share))
        .route("/{id}/shares", get(shares::get_list_shares))
}
