//! Integration tests for forum posts.

use axum::http::StatusCode;
use serde_json::json;

use torum_entity::user::UserRole;

use crate::helpers::TestApp;

async fn create_post(app: &TestApp, token: &str, title: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/posts",
            Some(json!({ "post_title": title, "post_content": "Body text" })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.data()["post_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_post_lifecycle_for_owner() {
    let app = test_app!();
    let author = app.create_user(UserRole::User).await;

    let post_id = create_post(&app, &author.access_token, "First thoughts").await;

    let fetched = app
        .request("GET", &format!("/api/posts/{post_id}"), None, None)
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.data()["post_title"], "First thoughts");
    assert_eq!(fetched.data()["post_owner"], author.id.to_string());

    let mine = app
        .request("GET", "/api/posts/mine", None, Some(&author.access_token))
        .await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.data()["total_items"], 1);
    assert_eq!(mine.data()["items"][0]["post_id"], post_id);

    let updated = app
        .request(
            "PUT",
            &format!("/api/posts/{post_id}"),
            Some(json!({ "post_title": "Second thoughts", "post_content": "Edited" })),
            Some(&author.access_token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["message"], "Post updated successfully");

    let fetched = app
        .request("GET", &format!("/api/posts/{post_id}"), None, None)
        .await;
    assert_eq!(fetched.data()["post_title"], "Second thoughts");
    assert_eq!(fetched.data()["post_content"], "Edited");

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/posts/{post_id}"),
            None,
            Some(&author.access_token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
}

#[tokio::test]
async fn test_other_members_cannot_touch_a_post() {
    let app = test_app!();
    let author = app.create_user(UserRole::User).await;
    let stranger = app.create_user(UserRole::User).await;
    let post_id = create_post(&app, &author.access_token, "Hands off").await;

    let update = app
        .request(
            "PUT",
            &format!("/api/posts/{post_id}"),
            Some(json!({ "post_title": "Hijacked", "post_content": "" })),
            Some(&stranger.access_token),
        )
        .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let delete = app
        .request(
            "DELETE",
            &format!("/api/posts/{post_id}"),
            None,
            Some(&stranger.access_token),
        )
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let fetched = app
        .request("GET", &format!("/api/posts/{post_id}"), None, None)
        .await;
    assert_eq!(fetched.data()["post_title"], "Hands off");
}

#[tokio::test]
async fn test_moderator_can_remove_but_not_edit() {
    let app = test_app!();
    let author = app.create_user(UserRole::User).await;
    let moderator = app.create_user(UserRole::Moderator).await;
    let post_id = create_post(&app, &author.access_token, "Off topic").await;

    let update = app
        .request(
            "PUT",
            &format!("/api/posts/{post_id}"),
            Some(json!({ "post_title": "Moderated", "post_content": "" })),
            Some(&moderator.access_token),
        )
        .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let delete = app
        .request(
            "DELETE",
            &format!("/api/posts/{post_id}"),
            None,
            Some(&moderator.access_token),
        )
        .await;
    assert_eq!(delete.status, StatusCode::OK);
    assert_eq!(delete.data()["message"], "Post deleted successfully");

    let fetched = app
        .request("GET", &format!("/api/posts/{post_id}"), None, None)
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
    assert_eq!(fetched.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_creating_requires_authentication() {
    let app = test_app!();

    let response = app
        .request(
            "POST",
            "/api/posts",
            Some(json!({ "post_title": "Anonymous" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
