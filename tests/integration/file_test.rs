//! Integration tests for the listing, upload, edit and delete endpoints.

use axum::http::{StatusCode, header};

use crate::helpers::{Part, TestApp};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_listing_shows_public_files_paged_newest_first() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    for i in 0..15 {
        app.upload(Some(&alice.token), &format!("public {i}"), "public")
            .await;
    }
    for i in 0..5 {
        app.upload(Some(&alice.token), &format!("private {i}"), "private")
            .await;
    }

    let page1 = app.request("GET", "/api/files", None).await;
    assert_eq!(page1.status, StatusCode::OK);
    let data = &page1.body["data"];
    assert_eq!(data["items"].as_array().unwrap().len(), 10);
    assert_eq!(data["total_items"], 15);
    let created: Vec<_> = data["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| chrono::DateTime::parse_from_rfc3339(f["created_at"].as_str().unwrap()).unwrap())
        .collect();
    assert!(created.windows(2).all(|w| w[0] >= w[1]));
    assert!(data["search"].is_null());

    let page2 = app.request("GET", "/api/files?page=2", None).await;
    let items = page2.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert!(items.iter().all(|f| f["access"] == "public"));

    let page3 = app.request("GET", "/api/files?page=3", None).await;
    assert_eq!(page3.status, StatusCode::NOT_FOUND);

    let bogus = app.request("GET", "/api/files?page=abc", None).await;
    assert_eq!(bogus.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_rejects_invalid_pages() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    app.upload(Some(&alice.token), "only file", "public").await;

    for uri in [
        "/api/files?page=0",
        "/api/files?page=abc",
        "/api/files?page=-1",
        "/api/files?page=2",
        "/api/files?page=18446744073709551615",
        "/api/files?page=9223372036854775807",
        "/api/files?page=99999999999999999999999",
    ] {
        let response = app.request("GET", uri, None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(response.body["error"], "NOT_FOUND", "{uri}");
        assert_eq!(response.body["message"], "Invalid page", "{uri}");
    }

    for uri in ["/api/files?page=1", "/api/files?page=", "/api/files?page=%201%20"] {
        let response = app.request("GET", uri, None).await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");
        assert_eq!(response.body["data"]["total_items"], 1, "{uri}");
    }
}

#[tokio::test]
async fn test_search_is_case_insensitive_and_echoed() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    app.upload(Some(&alice.token), "Budget 2024", "public").await;
    app.upload(Some(&alice.token), "budget secret", "private").await;
    app.upload(Some(&alice.token), "Travel", "public").await;

    let response = app.request("GET", "/api/files?search=BUDGET", None).await;
    let data = &response.body["data"];
    assert_eq!(data["search"], "BUDGET");
    let items = data["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Budget 2024");

    let blank = app.request("GET", "/api/files?search=", None).await;
    assert_eq!(blank.body["data"]["total_items"], 2);
    assert!(blank.body["data"]["search"].is_null());
}

#[tokio::test]
async fn test_anonymous_upload_is_public_and_authorless() {
    let app = TestApp::new().await;

    let id = app.upload(None, "anonymous notes", "private").await;

    let detail = app.request("GET", &format!("/api/files/{id}"), None).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["data"]["access"], "public");
    assert!(detail.body["data"]["author_id"].is_null());
    assert_eq!(detail.body["data"]["can_modify"], false);

    let download = app
        .request("GET", &format!("/api/files/{id}/download"), None)
        .await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.bytes, b"file content");
    assert!(
        download.headers[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("upload.txt")
    );
}

#[tokio::test]
async fn test_upload_validation_errors_are_per_field() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    let long_name = "x".repeat(101);

    let response = app
        .multipart(
            "POST",
            "/api/files",
            Some(&alice.token),
            &[
                Part::Text("name", &long_name),
                Part::Text("access", "secret"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    let details = response.body["details"].as_object().unwrap();
    assert!(details.contains_key("name"));
    assert!(details.contains_key("access"));
    assert!(details.contains_key("file"));

    let listing = app.request("GET", "/api/files", None).await;
    assert_eq!(listing.body["data"]["total_items"], 0);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = TestApp::new().await;
    let big = vec![b'a'; 2048];

    let response = app
        .multipart(
            "POST",
            "/api/files",
            None,
            &[Part::Text("name", "big"), Part::File("file", "big.txt", &big)],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]["file"].is_array());
}

#[tokio::test]
async fn test_author_edits_file() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    let id = app.upload(Some(&alice.token), "draft", "public").await;

    let response = app
        .multipart(
            "PUT",
            &format!("/api/files/{id}"),
            Some(&alice.token),
            &[
                Part::Text("name", "final"),
                Part::Text("access", "private"),
                Part::File("file", "final.txt", b"final content"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["name"], "final");
    assert_eq!(response.body["data"]["access"], "private");
    assert_eq!(response.body["data"]["author_id"], alice.user.id.to_string());

    let download = app
        .request("GET", &format!("/api/files/{id}/download"), Some(&alice.token))
        .await;
    assert_eq!(download.bytes, b"final content");
}

#[tokio::test]
async fn test_delete_redirects_to_listing() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    let id = app.upload(Some(&alice.token), "temporary", "public").await;

    let response = app
        .request("DELETE", &format!("/api/files/{id}"), Some(&alice.token))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.headers[header::LOCATION], "/api/files");

    let detail = app.request("GET", &format!("/api/files/{id}"), None).await;
    assert_eq!(detail.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_profile_lists_public_uploads() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    app.upload(Some(&alice.token), "shown", "public").await;
    app.upload(Some(&alice.token), "hidden", "private").await;

    let response = app
        .request("GET", &format!("/api/users/{}", alice.user.id), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "alice");
    let files = response.body["data"]["files"]["items"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "shown");

    let missing = app
        .request("GET", &format!("/api/users/{}", uuid::Uuid::new_v4()), None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
