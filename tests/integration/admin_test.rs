//! Integration tests for admin user management and profile visibility.

use axum::http::StatusCode;
use serde_json::json;

use torum_entity::user::UserRole;

#[tokio::test]
async fn test_admin_lists_and_promotes_users() {
    let app = test_app!();
    let admin = app.create_user(UserRole::Admin).await;
    let member = app.create_user(UserRole::User).await;

    let listed = app
        .request(
            "GET",
            "/api/admin/users?role=admin&per_page=100",
            None,
            Some(&admin.access_token),
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let items = listed.data()["items"].as_array().unwrap();
    assert!(items.iter().all(|u| u["user_role"] == "admin"));
    assert!(listed.data()["total_items"].as_u64().unwrap() >= 1);

    let promoted = app
        .request(
            "PUT",
            &format!("/api/admin/users/{}/role", member.id),
            Some(json!({ "user_role": "moderator" })),
            Some(&admin.access_token),
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.data()["user_role"], "moderator");
}

#[tokio::test]
async fn test_admin_cannot_change_own_role() {
    let app = test_app!();
    let admin = app.create_user(UserRole::Admin).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{}/role", admin.id),
            Some(json!({ "user_role": "user" })),
            Some(&admin.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Cannot change your own role");
}

#[tokio::test]
async fn test_members_are_kept_out_of_admin_routes() {
    let app = test_app!();
    let member = app.create_user(UserRole::User).await;

    let response = app
        .request("GET", "/api/admin/users", None, Some(&member.access_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_profile_visibility() {
    let app = test_app!();
    let member = app.create_user(UserRole::User).await;
    let other = app.create_user(UserRole::User).await;
    let moderator = app.create_user(UserRole::Moderator).await;
    let path = format!("/api/users/{}", other.id);

    let own = app
        .request(
            "GET",
            &format!("/api/users/{}", member.id),
            None,
            Some(&member.access_token),
        )
        .await;
    assert_eq!(own.status, StatusCode::OK);

    let denied = app
        .request("GET", &path, None, Some(&member.access_token))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let allowed = app
        .request("GET", &path, None, Some(&moderator.access_token))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.data()["email"], other.email);
}
