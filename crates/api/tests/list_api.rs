//! HTTP-level integration tests for list CRUD and access resolution.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_list, delete_auth, get_auth, patch_json_auth, post_json_auth, register_user,
    share_list,
};
use sqlx::PgPool;

/// Creating a list makes the caller its owner.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_and_get_list(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, token) = register_user(app.clone(), "alice").await;

    let response = post_json_auth(
        app.clone(),
        "/api/lists",
        serde_json::json!({ "name": "Groceries" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let list = body_json(response).await;
    assert_eq!(list["name"], "Groceries");
    assert_eq!(list["authorId"], user_id);

    let list_id = list["id"].as_i64().unwrap();
    let response = get_auth(app, &format!("/api/lists/{list_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await;
    assert_eq!(summary["role"], "owner");
    assert_eq!(summary["itemsCount"], 0);
    assert_eq!(summary["completedCount"], 0);
    assert_eq!(summary["sharesCount"], 0);
}

/// An empty list name is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_list_empty_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = register_user(app.clone(), "alice").await;

    let response = post_json_auth(app, "/api/lists", serde_json::json!({ "name": "" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The index returns owned and shared lists with the caller's role.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_index_includes_shared(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_user(app.clone(), "alice").await;
    let (_, bob) = register_user(app.clone(), "bob").await;

    let own_id = create_list(app.clone(), &bob, "Bob's own").await;
    let shared_id = create_list(app.clone(), &alice, "Alice shares this").await;
    share_list(app.clone(), &alice, shared_id, "bob").await;

    let response = get_auth(app, "/api/lists", &bob).await;
    assert_eq!(response.status(), StatusCode::OK);
    let lists = body_json(response).await;
    let lists = lists.as_array().unwrap();
    assert_eq!(lists.len(), 2);

    let own = lists.iter().find(|l| l["id"] == own_id).unwrap();
    assert_eq!(own["role"], "owner");
    let shared = lists.iter().find(|l| l["id"] == shared_id).unwrap();
    assert_eq!(shared["role"], "editor");
}

/// A user with no share gets 404 -- not 403 -- so list ids cannot be probed.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_list_no_access_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_user(app.clone(), "alice").await;
    let (_, mallory) = register_user(app.clone(), "mallory").await;

    let list_id = create_list(app.clone(), &alice, "Private").await;

    let response = get_auth(app, &format!("/api/lists/{list_id}"), &mallory).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

/// Editors may rename a list.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_editor_can_rename(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_user(app.clone(), "alice").await;
    let (_, bob) = register_user(app.clone(), "bob").await;

    let list_id = create_list(app.clone(), &alice, "Old name").await;
    share_list(app.clone(), &alice, list_id, "bob").await;

    let response = patch_json_auth(
        app,
        &format!("/api/lists/{list_id}"),
        serde_json::json!({ "name": "New name" }),
        &bob,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "New name");
}

/// Deleting a list is owner-only: editors get 403, strangers get 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_list_owner_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_user(app.clone(), "alice").await;
    let (_, bob) = register_user(app.clone(), "bob").await;
    let (_, mallory) = register_user(app.clone(), "mallory").await;

    let list_id = create_list(app.clone(), &alice, "Protected").await;
    share_list(app.clone(), &alice, list_id, "bob").await;

    let response = delete_auth(app.clone(), &format!("/api/lists/{list_id}"), &bob).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &format!("/api/lists/{list_id}"), &mallory).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &format!("/api/lists/{list_id}"), &alice).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/lists/{list_id}"), &alice).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
