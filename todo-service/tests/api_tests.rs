mod common;

use common::TestApp;
use common::PASSWORD;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_create_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "username": "nicola",
            "email": "nicola@example.com",
            "first_name": "Nicola",
            "last_name": "Rossi",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert_eq!(body["data"]["role"], "user");
    assert_eq!(body["data"]["is_active"], true);
    assert!(body["data"]["id"].is_i64());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_duplicate_username() {
    let app = TestApp::spawn().await;
    app.register("nicola").await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "username": "nicola",
            "email": "other@example.com",
            "first_name": "Nicola",
            "last_name": "Rossi",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("nicola").await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "username": "other",
            "email": "nicola@example.com",
            "first_name": "Nicola",
            "last_name": "Rossi",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_user_invalid_fields() {
    let app = TestApp::spawn().await;

    let cases = [
        ("ab", "nicola@example.com", "pass_word!", "username"),
        ("nicola", "not-an-email", "pass_word!", "email"),
        ("nicola", "nicola@example.com", "short", "password"),
    ];

    for (username, email, password, field) in cases {
        let response = app
            .post("/api/users")
            .json(&json!({
                "username": username,
                "email": email,
                "first_name": "Nicola",
                "last_name": "Rossi",
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert!(body["data"]["message"]
            .as_str()
            .unwrap()
            .to_lowercase()
            .contains(field));
    }
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.register_and_login("nicola").await;

    let response = app
        .get_authenticated(&format!("/api/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], user_id);
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["first_name"], "Test");
}

#[tokio::test]
async fn test_get_other_user_forbidden() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("nicola").await;
    let other_id = app.register("other").await;

    let response = app
        .get_authenticated(&format!("/api/users/{}", other_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_gets_missing_user_not_found() {
    let app = TestApp::spawn().await;
    let (admin_id, token) = app.register_and_login("root").await;
    app.promote_to_admin(admin_id).await;

    let response = app
        .get_authenticated("/api/users/999", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"].is_string());
}

#[tokio::test]
async fn test_invalid_user_id_in_path() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("nicola").await;

    let response = app
        .get_authenticated("/api/users/abc", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_user_and_login_with_new_password() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.register_and_login("nicola").await;

    let response = app
        .patch_authenticated(&format!("/api/users/{}", user_id), &token)
        .json(&json!({
            "email": "new@example.com",
            "password": "brand_new_password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "new@example.com");
    assert_eq!(body["data"]["username"], "nicola");

    let old = app.login_response("nicola", PASSWORD).await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    let new = app.login_response("nicola", "brand_new_password").await;
    assert_eq!(new.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_regular_user_cannot_change_role() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.register_and_login("nicola").await;

    let response = app
        .patch_authenticated(&format!("/api/users/{}", user_id), &token)
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_role_rejected() {
    let app = TestApp::spawn().await;
    let (admin_id, token) = app.register_and_login("root").await;
    app.promote_to_admin(admin_id).await;

    let response = app
        .patch_authenticated(&format!("/api/users/{}", admin_id), &token)
        .json(&json!({ "role": "superuser" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_admin_deactivates_user_who_then_cannot_log_in() {
    let app = TestApp::spawn().await;
    let (admin_id, admin_token) = app.register_and_login("root").await;
    app.promote_to_admin(admin_id).await;
    let user_id = app.register("nicola").await;

    let response = app
        .patch_authenticated(&format!("/api/users/{}", user_id), &admin_token)
        .json(&json!({ "is_active": false }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["is_active"], false);

    let login = app.login_response("nicola", PASSWORD).await;
    assert_eq!(login.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.register_and_login("nicola").await;
    let other_id = app.register("other").await;

    let response = app
        .delete_authenticated(&format!("/api/users/{}", other_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .delete_authenticated(&format!("/api/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_deleting_user_removes_their_todos() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.register_and_login("nicola").await;
    let (other_id, other_token) = app.register_and_login("other").await;

    app.create_todo(&token, "Buy milk").await;
    app.create_todo(&token, "Walk dog").await;
    app.create_todo(&other_token, "Fix bike").await;
    assert_eq!(app.count_todos(user_id).await, 2);

    let response = app
        .delete_authenticated(&format!("/api/users/{}", user_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(app.count_todos(user_id).await, 0);
    assert_eq!(app.count_todos(other_id).await, 1);
}

#[tokio::test]
async fn test_admin_deletes_other_user() {
    let app = TestApp::spawn().await;
    let (admin_id, admin_token) = app.register_and_login("root").await;
    app.promote_to_admin(admin_id).await;
    let (user_id, token) = app.register_and_login("nicola").await;
    let todo_id = app.create_todo(&token, "Buy milk").await;

    let response = app
        .delete_authenticated(&format!("/api/users/{}", user_id), &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&format!("/api/users/{}", user_id), &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .get_authenticated(&format!("/api/todos/{}", todo_id), &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The deleted user's token no longer resolves to anyone.
    let response = app
        .get_authenticated("/api/todos", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_cannot_assign_placeholder_role() {
    let app = TestApp::spawn().await;
    let (admin_id, admin_token) = app.register_and_login("root").await;
    app.promote_to_admin(admin_id).await;
    let user_id = app.register("nicola").await;

    let response = app
        .patch_authenticated(&format!("/api/users/{}", user_id), &admin_token)
        .json(&json!({ "role": "unauthenticated" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .get_authenticated(&format!("/api/users/{}", user_id), &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["role"], "user");
}
