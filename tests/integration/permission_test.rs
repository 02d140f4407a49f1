//! Integration tests for the edit and delete permission gate.

use axum::http::StatusCode;

use fileshare_entity::user::UserPermission;

use crate::helpers::{Part, TestApp};

#[tokio::test]
async fn test_anonymous_cannot_modify() {
    let app = TestApp::new().await;
    let id = app.upload(None, "orphan", "public").await;

    let edit = app
        .multipart(
            "PUT",
            &format!("/api/files/{id}"),
            None,
            &[Part::Text("name", "hijacked")],
        )
        .await;
    assert_eq!(edit.status, StatusCode::UNAUTHORIZED);

    let delete = app.request("DELETE", &format!("/api/files/{id}"), None).await;
    assert_eq!(delete.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_author_without_permission_is_forbidden() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    let mallory = app.create_user("mallory", vec![]).await;
    let id = app.upload(Some(&alice.token), "report", "public").await;

    let edit = app
        .multipart(
            "PUT",
            &format!("/api/files/{id}"),
            Some(&mallory.token),
            &[Part::Text("name", "defaced")],
        )
        .await;
    assert_eq!(edit.status, StatusCode::FORBIDDEN);

    let delete = app
        .request("DELETE", &format!("/api/files/{id}"), Some(&mallory.token))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let detail = app.request("GET", &format!("/api/files/{id}"), None).await;
    assert_eq!(detail.body["data"]["name"], "report");
}

#[tokio::test]
async fn test_elevated_permissions_allow_modification() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    let editor = app
        .create_user("editor", vec![UserPermission::ChangeFile])
        .await;
    let remover = app
        .create_user("remover", vec![UserPermission::DeleteFile])
        .await;
    let id = app.upload(Some(&alice.token), "report", "private").await;

    let edit = app
        .multipart(
            "PUT",
            &format!("/api/files/{id}"),
            Some(&editor.token),
            &[Part::Text("name", "reviewed")],
        )
        .await;
    assert_eq!(edit.status, StatusCode::OK);
    assert_eq!(edit.body["data"]["author_id"], alice.user.id.to_string());

    let editor_delete = app
        .request("DELETE", &format!("/api/files/{id}"), Some(&editor.token))
        .await;
    assert_eq!(editor_delete.status, StatusCode::FORBIDDEN);

    let delete = app
        .request("DELETE", &format!("/api/files/{id}"), Some(&remover.token))
        .await;
    assert_eq!(delete.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_invalid_token_is_rejected_not_downgraded() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/files", Some("garbage")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}
