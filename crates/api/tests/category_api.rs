//! HTTP-level integration tests for the category system: personal
//! dictionary CRUD, list-scoped resolution, local categories, promotion
//! ("save to user"), and owner import.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_list, delete_auth, get_auth, patch_json_auth, post_json_auth,
    register_user, share_list,
};
use sqlx::PgPool;

/// Create a category on a list through the API and return its id.
async fn add_list_category(
    app: axum::Router,
    token: &str,
    list_id: i64,
    name: &str,
) -> serde_json::Value {
    let response = post_json_auth(
        app,
        &format!("/api/lists/{list_id}/categories/local"),
        serde_json::json!({ "name": name, "icon": "🏷️" }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED, "category creation should succeed");
    body_json(response).await
}

/// Personal dictionary CRUD with per-user name uniqueness.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_personal_category_crud(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_user(app.clone(), "alice").await;

    let response = post_json_auth(
        app.clone(),
        "/api/categories",
        serde_json::json!({ "name": "Snacks", "icon": "🍿" }),
        &alice,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let category = body_json(response).await;
    let category_id = category["id"].as_i64().unwrap();
    assert!(category["listId"].is_null(), "personal scope has no list");

    // Same name again: 409.
    let response = post_json_auth(
        app.clone(),
        "/api/categories",
        serde_json::json!({ "name": "Snacks", "icon": "🥨" }),
        &alice,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Renaming onto an existing name: 409. (Dairy is seeded.)
    let response = patch_json_auth(
        app.clone(),
        &format!("/api/categories/{category_id}"),
        serde_json::json!({ "name": "Dairy" }),
        &alice,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Renaming to a fresh name works.
    let response = patch_json_auth(
        app.clone(),
        &format!("/api/categories/{category_id}"),
        serde_json::json!({ "name": "Treats" }),
        &alice,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let category = body_json(response).await;
    assert_eq!(category["name"], "Treats");
    assert_eq!(category["icon"], "🍿", "icon untouched by a name-only patch");

    let response = delete_auth(app.clone(), &format!("/api/categories/{category_id}"), &alice).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &format!("/api/categories/{category_id}"), &alice).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The same name is fine for two different users.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_personal_names_unique_per_user_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_user(app.clone(), "alice").await;
    let (_, bob) = register_user(app.clone(), "bob").await;

    for token in [&alice, &bob] {
        let response = post_json_auth(
            app.clone(),
            "/api/categories",
            serde_json::json!({ "name": "Snacks", "icon": "🍿" }),
            token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

/// Another user's personal dictionary is not reachable for update/delete.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_personal_category_owner_scoped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_user(app.clone(), "alice").await;
    let (_, bob) = register_user(app.clone(), "bob").await;

    let response = post_json_auth(
        app.clone(),
        "/api/categories",
        serde_json::json!({ "name": "Snacks", "icon": "🍿" }),
        &alice,
    )
    .await;
    let category_id = body_json(response).await["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/api/categories/{category_id}"), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = patch_json_auth(
        app,
        &format!("/api/categories/{category_id}"),
        serde_json::json!({ "name": "Hijacked" }),
        &bob,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// On the list endpoint, the owner gets a personal category; a collaborator
/// gets a local one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_category_scope_depends_on_role(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_user(app.clone(), "alice").await;
    let (_, bob) = register_user(app.clone(), "bob").await;

    let list_id = create_list(app.clone(), &alice, "Shared").await;
    share_list(app.clone(), &alice, list_id, "bob").await;

    let owner_created = add_list_category(app.clone(), &alice, list_id, "Baking").await;
    assert_eq!(owner_created["type"], "user");
    assert_eq!(owner_created["isOwner"], true);

    let editor_created = add_list_category(app.clone(), &bob, list_id, "Snacks").await;
    assert_eq!(editor_created["type"], "local");

    // The owner's creation landed in their personal dictionary.
    let response = get_auth(app.clone(), "/api/categories", &alice).await;
    let personal = body_json(response).await;
    assert!(personal
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["name"] == "Baking"));

    // The editor's creation did not pollute their personal dictionary.
    let response = get_auth(app, "/api/categories", &bob).await;
    let personal = body_json(response).await;
    assert!(!personal
        .as_array()
        .unwrap()
        .iter()
        .any(|c| c["name"] == "Snacks"));
}

/// Local names are unique per list, across collaborators.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_local_name_unique_per_list(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_user(app.clone(), "alice").await;
    let (_, bob) = register_user(app.clone(), "bob").await;
    let (_, carol) = register_user(app.clone(), "carol").await;

    let list_id = create_list(app.clone(), &alice, "Shared").await;
    share_list(app.clone(), &alice, list_id, "bob").await;
    share_list(app.clone(), &alice, list_id, "carol").await;

    add_list_category(app.clone(), &bob, list_id, "Snacks").await;

    // A different collaborator cannot reuse the name on the same list.
    let response = post_json_auth(
        app,
        &format!("/api/lists/{list_id}/categories/local"),
        serde_json::json!({ "name": "Snacks", "icon": "🥨" }),
        &carol,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// The list-scoped listing is the union of the owner's personal dictionary
/// and the list's local categories, tagged for the caller.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_categories_union(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_user(app.clone(), "alice").await;
    let (_, bob) = register_user(app.clone(), "bob").await;

    let list_id = create_list(app.clone(), &alice, "Shared").await;
    share_list(app.clone(), &alice, list_id, "bob").await;

    add_list_category(app.clone(), &bob, list_id, "Snacks").await;

    let response = get_auth(app.clone(), &format!("/api/lists/{list_id}/categories"), &bob).await;
    assert_eq!(response.status(), StatusCode::OK);
    let categories = body_json(response).await;
    let categories = categories.as_array().unwrap();

    // 6 seeded personal categories of the owner + Bob's local one.
    assert_eq!(categories.len(), 7);

    let snacks = categories.iter().find(|c| c["name"] == "Snacks").unwrap();
    assert_eq!(snacks["type"], "local");
    assert_eq!(snacks["isOwner"], true, "Bob created the local category");

    let dairy = categories.iter().find(|c| c["name"] == "Dairy").unwrap();
    assert_eq!(dairy["type"], "user");
    assert_eq!(dairy["isOwner"], false, "owner's personal category, not Bob's");

    // Strangers cannot see the resolution at all.
    let (_, mallory) = register_user(app.clone(), "mallory").await;
    let response = get_auth(app, &format!("/api/lists/{list_id}/categories"), &mallory).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The full promotion scenario: save-to-user and import-to-owner both copy;
/// the local row is never touched.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_save_and_import_leave_local_untouched(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_user(app.clone(), "alice").await;
    let (_, bob) = register_user(app.clone(), "bob").await;

    let list_id = create_list(app.clone(), &alice, "Shared").await;
    share_list(app.clone(), &alice, list_id, "bob").await;

    let local = add_list_category(app.clone(), &bob, list_id, "Snacks").await;
    let local_id = local["id"].as_i64().unwrap();
    let base = format!("/api/lists/{list_id}/categories/local/{local_id}");

    // Bob saves the local category into his own personal scope.
    let response = post_json_auth(
        app.clone(),
        &format!("{base}/save-to-user"),
        serde_json::json!({}),
        &bob,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let saved = body_json(response).await;
    assert!(saved["listId"].is_null(), "the copy is personal-scope");
    assert_ne!(saved["id"].as_i64().unwrap(), local_id, "a new row, not a move");

    let response = get_auth(app.clone(), "/api/categories", &bob).await;
    let personal = body_json(response).await;
    assert!(personal.as_array().unwrap().iter().any(|c| c["name"] == "Snacks"));

    // Bob cannot import to the owner; that is Alice's privilege.
    let response = post_json_auth(
        app.clone(),
        &format!("{base}/import-to-owner"),
        serde_json::json!({}),
        &bob,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Alice imports it into her own personal scope.
    let response = post_json_auth(
        app.clone(),
        &format!("{base}/import-to-owner"),
        serde_json::json!({}),
        &alice,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_auth(app.clone(), "/api/categories", &alice).await;
    let personal = body_json(response).await;
    assert!(personal.as_array().unwrap().iter().any(|c| c["name"] == "Snacks"));

    // The local row still exists, unchanged, on the list.
    let response = get_auth(app.clone(), &format!("/api/lists/{list_id}/categories"), &bob).await;
    let categories = body_json(response).await;
    let local_still = categories
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == local_id)
        .expect("local category must survive promotion");
    assert_eq!(local_still["type"], "local");

    // Saving again now conflicts with Bob's new personal category.
    let response = post_json_auth(
        app,
        &format!("{base}/save-to-user"),
        serde_json::json!({}),
        &bob,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Local category deletion: creator and list owner may delete; another
/// collaborator may not.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_local_category_permissions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = register_user(app.clone(), "alice").await;
    let (_, bob) = register_user(app.clone(), "bob").await;
    let (_, carol) = register_user(app.clone(), "carol").await;

    let list_id = create_list(app.clone(), &alice, "Shared").await;
    share_list(app.clone(), &alice, list_id, "bob").await;
    share_list(app.clone(), &alice, list_id, "carol").await;

    let local = add_list_category(app.clone(), &bob, list_id, "Snacks").await;
    let local_id = local["id"].as_i64().unwrap();
    let uri = format!("/api/lists/{list_id}/categories/local/{local_id}");

    // Carol has list access but is neither creator nor owner.
    let response = delete_auth(app.clone(), &uri, &carol).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Bob created it.
    let response = delete_auth(app.clone(), &uri, &bob).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The list owner may delete any local category.
    let local = add_list_category(app.clone(), &carol, list_id, "Drinks").await;
    let local_id = local["id"].as_i64().unwrap();
    let response = delete_auth(
        app,
        &format!("/api/lists/{list_id}/categories/local/{local_id}"),
        &alice,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
