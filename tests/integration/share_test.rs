//! Integration tests for granting and revoking private visibility.

use axum::http::StatusCode;
use uuid::Uuid;

use fileshare_database::store::GrantStore;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_grant_view_revoke_scenario() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    let bob = app.create_user("bob", vec![]).await;
    let id = app.upload(Some(&alice.token), "plans", "private").await;
    let detail_uri = format!("/api/files/{id}");

    let before = app.request("GET", &detail_uri, Some(&bob.token)).await;
    assert_eq!(before.status, StatusCode::FORBIDDEN);

    let grant = app
        .request(
            "POST",
            &format!("/api/access/grant?search_user=bob&file_id={id}"),
            Some(&alice.token),
        )
        .await;
    assert_eq!(grant.status, StatusCode::OK);
    assert_eq!(grant.body["user"], "bob");
    assert_eq!(grant.body["user_id"], bob.user.id.to_string());

    let during = app.request("GET", &detail_uri, Some(&bob.token)).await;
    assert_eq!(during.status, StatusCode::OK);
    assert!(during.body["data"].get("private_users").is_none());

    let owner_view = app.request("GET", &detail_uri, Some(&alice.token)).await;
    let members = owner_view.body["data"]["private_users"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["username"], "bob");

    let revoke = app
        .request(
            "POST",
            &format!("/api/access/revoke?file_id={id}&user_id={}", bob.user.id),
            Some(&alice.token),
        )
        .await;
    assert_eq!(revoke.status, StatusCode::OK);
    assert_eq!(revoke.body["status"], "200");
    assert_eq!(revoke.body["removed"], true);

    let after = app.request("GET", &detail_uri, Some(&bob.token)).await;
    assert_eq!(after.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_grant_twice_is_idempotent() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    let bob = app.create_user("bob", vec![]).await;
    let id = app.upload(Some(&alice.token), "plans", "private").await;
    let uri = format!("/api/access/grant?search_user=bob&file_id={id}");

    let first = app.request("POST", &uri, Some(&alice.token)).await;
    let second = app.request("POST", &uri, Some(&alice.token)).await;

    assert_eq!(first.body["added"], true);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["added"], false);
    let members = app.store.member_ids(id).await.unwrap();
    assert_eq!(members, vec![bob.user.id]);
}

#[tokio::test]
async fn test_grant_lookup_failures_share_one_message() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    let id = app.upload(Some(&alice.token), "plans", "private").await;

    let uris = [
        format!("/api/access/grant?search_user=ghost&file_id={id}"),
        format!("/api/access/grant?search_user=&file_id={id}"),
        format!("/api/access/grant?search_user=alice&file_id={}", Uuid::new_v4()),
        "/api/access/grant?search_user=alice&file_id=not-a-uuid".to_string(),
        "/api/access/grant?search_user=alice".to_string(),
    ];
    for uri in uris {
        let response = app.request("POST", &uri, Some(&alice.token)).await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");
        assert_eq!(response.body["error"], "User does not exist", "{uri}");
    }
}

#[tokio::test]
async fn test_revoke_validates_ids() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    let id = app.upload(Some(&alice.token), "plans", "private").await;

    let unknown_user = app
        .request(
            "POST",
            &format!("/api/access/revoke?file_id={id}&user_id={}", Uuid::new_v4()),
            Some(&alice.token),
        )
        .await;
    assert_eq!(unknown_user.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request(
            "POST",
            "/api/access/revoke?file_id=nope&user_id=nope",
            Some(&alice.token),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let not_member = app
        .request(
            "POST",
            &format!("/api/access/revoke?file_id={id}&user_id={}", alice.user.id),
            Some(&alice.token),
        )
        .await;
    assert_eq!(not_member.status, StatusCode::OK);
    assert_eq!(not_member.body["removed"], false);
}

#[tokio::test]
async fn test_sharing_requires_authentication_and_ownership() {
    let app = TestApp::new().await;
    let alice = app.create_user("alice", vec![]).await;
    let mallory = app.create_user("mallory", vec![]).await;
    let id = app.upload(Some(&alice.token), "plans", "private").await;
    let uri = format!("/api/access/grant?search_user=mallory&file_id={id}");

    let anonymous = app.request("POST", &uri, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let stranger = app.request("POST", &uri, Some(&mallory.token)).await;
    assert_eq!(stranger.status, StatusCode::FORBIDDEN);
    assert!(app.store.member_ids(id).await.unwrap().is_empty());
}
