//! Integration tests for full-text search over posts and documents.

use axum::http::StatusCode;
use serde_json::json;

use torum_entity::user::UserRole;

use crate::helpers::{pdf_bytes, unique_word};

#[tokio::test]
async fn test_search_finds_posts_and_documents() {
    let app = test_app!();
    let user = app.create_user(UserRole::User).await;
    let word = unique_word();

    let post = app
        .request(
            "POST",
            "/api/posts",
            Some(json!({
                "post_title": format!("About {word}"),
                "post_content": "A post worth finding",
            })),
            Some(&user.access_token),
        )
        .await;
    assert_eq!(post.status, StatusCode::CREATED);

    let document = app
        .upload(
            &user.access_token,
            &format!("{word} handbook"),
            "handbook.pdf",
            &pdf_bytes(),
        )
        .await;
    assert_eq!(document.status, StatusCode::CREATED);

    let response = app
        .request("GET", &format!("/api/search?q={word}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["post_total"], 1);
    assert_eq!(response.data()["document_total"], 1);
    assert_eq!(
        response.data()["post_result"][0]["post_id"],
        post.data()["post_id"]
    );
    assert_eq!(
        response.data()["document_result"][0]["docs_id"],
        document.data()["docs_id"]
    );
}

#[tokio::test]
async fn test_search_matches_prefixes() {
    let app = test_app!();
    let user = app.create_user(UserRole::User).await;
    let word = unique_word();

    app.request(
        "POST",
        "/api/posts",
        Some(json!({ "post_title": "Prefix match", "post_content": word })),
        Some(&user.access_token),
    )
    .await;

    let prefix = &word[..word.len() - 4];
    let response = app
        .request("GET", &format!("/api/search?q={prefix}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["post_total"], 1);
}

#[tokio::test]
async fn test_search_of_only_stop_words() {
    let app = test_app!();

    let response = app
        .request("GET", "/api/search?q=the%20and%20of", None, None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    // A stop word next to a real term is simply dropped.
    let response = app.request("GET", "/api/search?q=the%20rust", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_search_without_terms() {
    let app = test_app!();

    let response = app.request("GET", "/api/search?q=%20%21", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_results_are_ranked_and_paged_per_kind() {
    let app = test_app!();
    let user = app.create_user(UserRole::User).await;
    let word = unique_word();

    // Term density decides the rank: three mentions, two, then one.
    let mut post_ids = Vec::new();
    for (title, content) in [
        (format!("{word} {word}"), format!("All about {word}")),
        (format!("Notes on {word}"), format!("{word} again")),
        ("Passing mention".to_string(), format!("Once: {word}")),
    ] {
        let response = app
            .request(
                "POST",
                "/api/posts",
                Some(json!({ "post_title": title, "post_content": content })),
                Some(&user.access_token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        post_ids.push(response.data()["post_id"].clone());
    }

    let mut docs_ids = Vec::new();
    for title in [format!("{word} {word} {word}"), format!("{word} primer")] {
        let response = app
            .upload(&user.access_token, &title, "reading.pdf", &pdf_bytes())
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        docs_ids.push(response.data()["docs_id"].clone());
    }

    let first = app
        .request(
            "GET",
            &format!("/api/search?q={word}&page=1&per_page=2"),
            None,
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    let data = first.data();
    assert_eq!(data["page"], 1);
    assert_eq!(data["per_page"], 2);
    assert_eq!(data["post_total"], 3);
    assert_eq!(data["document_total"], 2);
    let posts = data["post_result"].as_array().unwrap();
    let documents = data["document_result"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["post_id"], post_ids[0]);
    assert_eq!(posts[1]["post_id"], post_ids[1]);
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0]["docs_id"], docs_ids[0]);
    assert_eq!(documents[1]["docs_id"], docs_ids[1]);

    let second = app
        .request(
            "GET",
            &format!("/api/search?q={word}&page=2&per_page=2"),
            None,
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
    let data = second.data();
    assert_eq!(data["page"], 2);
    assert_eq!(data["post_total"], 3);
    assert_eq!(data["document_total"], 2);
    let posts = data["post_result"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["post_id"], post_ids[2]);
    assert!(data["document_result"].as_array().unwrap().is_empty());
}
