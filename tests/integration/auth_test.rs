//! Integration tests for registration and the token lifecycle.

use axum::http::StatusCode;
use serde_json::json;

use torum_entity::user::UserRole;

use crate::helpers::{STRONG_PASSWORD, unique_email};

#[tokio::test]
async fn test_register_login_and_me() {
    let app = test_app!();
    let email = unique_email();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "  reader  ",
                "email": email,
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["username"], "reader");
    assert_eq!(response.data()["user_role"], "user");
    assert!(response.data().get("hashed_password").is_none());

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": email, "password": STRONG_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.data()["token_type"], "bearer");
    let token = login.data()["access_token"].as_str().unwrap().to_string();

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["email"], email);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = test_app!();
    let user = app.create_user(UserRole::User).await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "copycat",
                "email": user.email.to_uppercase(),
                "password": STRONG_PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["message"], "Email already existed");
}

#[tokio::test]
async fn test_weak_password_is_rejected() {
    let app = test_app!();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "reader",
                "email": unique_email(),
                "password": "password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_credentials_look_the_same() {
    let app = test_app!();
    let user = app.create_user(UserRole::User).await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": user.email, "password": "Not-The-Password-99" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": unique_email(), "password": STRONG_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["message"], unknown_email.body["message"]);
}

#[tokio::test]
async fn test_repeated_failures_are_throttled() {
    let app = test_app!();
    let user = app.create_user(UserRole::User).await;
    let attempts = app.state.config.auth.max_failed_attempts;

    for _ in 0..attempts {
        let response = app
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "email": user.email, "password": "Wrong-Password-123" })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let locked = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": user.email, "password": STRONG_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(locked.status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_refresh_issues_access_token_with_current_role() {
    let app = test_app!();
    let user = app.create_user(UserRole::User).await;

    torum_database::repositories::UserRepository::new(app.db_pool.clone())
        .update_role(user.id, UserRole::Moderator)
        .await
        .unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": user.refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["token_type"], "bearer");

    let token = response.data()["access_token"].as_str().unwrap();
    let claims = app.state.jwt_decoder.decode_access_token(token).await.unwrap();
    assert_eq!(claims.role, UserRole::Moderator);

    // An access token is not a refresh token.
    let misuse = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": user.access_token })),
            None,
        )
        .await;
    assert_eq!(misuse.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_both_tokens() {
    let app = test_app!();
    let user = app.create_user(UserRole::User).await;

    let response = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(json!({ "refresh_token": user.refresh_token })),
            Some(&user.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["message"], "Logout successfully");

    let me = app
        .request("GET", "/api/auth/me", None, Some(&user.access_token))
        .await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(me.body["message"], "Token has been revoked");

    let refresh = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": user.refresh_token })),
            None,
        )
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ignores_foreign_refresh_token() {
    let app = test_app!();
    let alice = app.create_user(UserRole::User).await;
    let bob = app.create_user(UserRole::User).await;

    let response = app
        .request(
            "POST",
            "/api/auth/logout",
            Some(json!({ "refresh_token": bob.refresh_token })),
            Some(&alice.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let refresh = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refresh_token": bob.refresh_token })),
            None,
        )
        .await;
    assert_eq!(refresh.status, StatusCode::OK);
}

#[tokio::test]
async fn test_profile_password_change() {
    let app = test_app!();
    let user = app.create_user(UserRole::User).await;
    let new_password = "Brisk-Meadow-7781-compass";

    let wrong_current = app
        .request(
            "PUT",
            "/api/users/me",
            Some(json!({ "password": "nope-nope-123", "new_password": new_password })),
            Some(&user.access_token),
        )
        .await;
    assert_eq!(wrong_current.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_current.body["message"], "Current password is incorrect");

    let changed = app
        .request(
            "PUT",
            "/api/users/me",
            Some(json!({
                "username": "renamed",
                "password": STRONG_PASSWORD,
                "new_password": new_password,
            })),
            Some(&user.access_token),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);
    assert_eq!(changed.data()["username"], "renamed");

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": user.email, "password": new_password })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
}
