//! Integration tests for reading document upload, download and removal.

use axum::http::StatusCode;

use torum_entity::user::UserRole;

use crate::helpers::pdf_bytes;

#[tokio::test]
async fn test_upload_download_and_delete() {
    let app = test_app!();
    let owner = app.create_user(UserRole::User).await;

    let uploaded = app
        .upload(&owner.access_token, "Rust notes", "notes.pdf", &pdf_bytes())
        .await;
    assert_eq!(uploaded.status, StatusCode::CREATED, "{}", uploaded.body);
    assert_eq!(uploaded.data()["content_type"], "application/pdf");
    assert_eq!(uploaded.data()["docs_tags"], "Documents");
    assert_eq!(uploaded.data()["docs_owner"], owner.id.to_string());
    let docs_id = uploaded.data()["docs_id"].as_str().unwrap().to_string();
    let key = uploaded.data()["docs_file_path"].as_str().unwrap().to_string();
    assert!(key.starts_with(&format!("documents/{}/", owner.id)));
    assert!(app.storage_dir.path().join(&key).exists());

    let download = app
        .request(
            "GET",
            &format!("/api/documents/{docs_id}/download"),
            None,
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.data()["expires_in"], 3600);
    assert!(
        download.data()["download_url"]
            .as_str()
            .unwrap()
            .contains(&key)
    );

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/documents/{docs_id}"),
            None,
            Some(&owner.access_token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.data()["message"], "Document deleted successfully");
    assert!(!app.storage_dir.path().join(&key).exists());

    let fetched = app
        .request("GET", &format!("/api/documents/{docs_id}"), None, None)
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_owner_or_moderator_may_delete() {
    let app = test_app!();
    let owner = app.create_user(UserRole::User).await;
    let stranger = app.create_user(UserRole::User).await;
    let moderator = app.create_user(UserRole::Moderator).await;

    let uploaded = app
        .upload(&owner.access_token, "Shared reading", "reading.pdf", &pdf_bytes())
        .await;
    let docs_id = uploaded.data()["docs_id"].as_str().unwrap().to_string();

    let denied = app
        .request(
            "DELETE",
            &format!("/api/documents/{docs_id}"),
            None,
            Some(&stranger.access_token),
        )
        .await;
    assert_eq!(denied.status, StatusCode::NOT_FOUND);

    let allowed = app
        .request(
            "DELETE",
            &format!("/api/documents/{docs_id}"),
            None,
            Some(&moderator.access_token),
        )
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_content_must_match_extension() {
    let app = test_app!();
    let owner = app.create_user(UserRole::User).await;

    let response = app
        .upload(&owner.access_token, "Fake", "fake.pdf", b"just some text")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let mine = app
        .request("GET", "/api/documents/mine", None, Some(&owner.access_token))
        .await;
    assert_eq!(mine.data()["total_items"], 0);
}

#[tokio::test]
async fn test_download_of_missing_document() {
    let app = test_app!();
    let user = app.create_user(UserRole::User).await;

    let response = app
        .request(
            "GET",
            &format!("/api/documents/{}/download", uuid::Uuid::new_v4()),
            None,
            Some(&user.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
