//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use fileshare_api::{AppState, build_app};
use fileshare_auth::JwtEncoder;
use fileshare_core::config::AppConfig;
use fileshare_core::traits::storage::StorageProvider;
use fileshare_database::MemoryStore;
use fileshare_database::store::UserStore;
use fileshare_entity::user::{CreateUser, User, UserPermission};
use fileshare_storage::LocalStorageProvider;

const BOUNDARY: &str = "fileshare-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store for direct inspection
    pub store: MemoryStore,
    encoder: JwtEncoder,
    _dir: TempDir,
}

/// A logged-in test user.
pub struct TestUser {
    /// The stored account.
    pub user: User,
    /// Bearer token for the account.
    pub token: String,
}

/// Response captured from the router
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body, `Value::Null` if the body is not JSON
    pub body: Value,
    /// Raw body bytes
    pub bytes: Vec<u8>,
}

/// One multipart part.
pub enum Part<'a> {
    /// A text field.
    Text(&'a str, &'a str),
    /// A file field: field name, filename, content.
    File(&'a str, &'a str, &'a [u8]),
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.storage.root_path = dir.path().display().to_string();
        config.storage.max_upload_size_bytes = 1024;

        let store = MemoryStore::new();
        let storage: Arc<dyn StorageProvider> = Arc::new(
            LocalStorageProvider::new(&config.storage.root_path)
                .await
                .expect("Failed to init storage"),
        );
        let encoder = JwtEncoder::new(&config.auth);
        let state = AppState::new(config, store.stores(), storage);

        Self {
            router: build_app(state),
            store,
            encoder,
            _dir: dir,
        }
    }

    /// Create a user and issue a token for it
    pub async fn create_user(&self, username: &str, permissions: Vec<UserPermission>) -> TestUser {
        let mut data = CreateUser::member(username);
        data.permissions = permissions;
        let user = UserStore::create(&self.store, &data)
            .await
            .expect("Failed to create test user");
        let (token, _) = self
            .encoder
            .generate_access_token(user.id, &user.username)
            .expect("Failed to issue token");
        TestUser { user, token }
    }

    /// Send a request without a body
    pub async fn request(&self, method: &str, uri: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Send a multipart/form-data request
    pub async fn multipart(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        parts: &[Part<'_>],
    ) -> TestResponse {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, filename, data) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: text/plain\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder().method(method).uri(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Upload a file and return its id
    pub async fn upload(&self, token: Option<&str>, name: &str, access: &str) -> Uuid {
        let response = self
            .multipart(
                "POST",
                "/api/files",
                token,
                &[
                    Part::Text("name", name),
                    Part::Text("access", access),
                    Part::File("file", "upload.txt", b"file content"),
                ],
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["id"]
            .as_str()
            .and_then(|id| id.parse().ok())
            .expect("upload response has an id")
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            bytes,
        }
    }
}
