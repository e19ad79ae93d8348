#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use motorlist_api::auth::jwt::{generate_access_token, JwtConfig};
use motorlist_api::config::{MediaConfig, ServerConfig};
use motorlist_api::router::build_app_router;
use motorlist_api::sessions::DraftSessions;
use motorlist_api::state::AppState;
use motorlist_db::{MemoryDocumentStore, MemoryMediaStore};

/// Photo size limit used by the test server: 1 KiB.
pub const TEST_MAX_UPLOAD_BYTES: usize = 1024;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: None,
        media: MediaConfig {
            dir: std::env::temp_dir().join("motorlist-test-media"),
            public_url: "http://localhost/media".to_string(),
            max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        },
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// The application under test plus handles on its in-memory backends.
#[derive(Clone)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryDocumentStore>,
    pub media: Arc<MemoryMediaStore>,
    pub sessions: Arc<DraftSessions>,
    pub config: ServerConfig,
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over in-memory document and media stores.
pub fn build_test_app() -> TestApp {
    build_test_app_with_media(MemoryMediaStore::new())
}

pub fn build_test_app_with_media(media: MemoryMediaStore) -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryDocumentStore::new());
    let media = Arc::new(media);
    let sessions = Arc::new(DraftSessions::new());

    let state = AppState {
        store: store.clone(),
        media: media.clone(),
        sessions: sessions.clone(),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        media,
        sessions,
        config,
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Token for a dealer operator acting for `profile`.
pub fn dealer_token(app: &TestApp, user_id: &str, profile: &str) -> String {
    generate_access_token(user_id, "dealer", Some(profile), &app.config.jwt).unwrap()
}

/// Token for an operator without a business profile.
pub fn buyer_token(app: &TestApp, user_id: &str) -> String {
    generate_access_token(user_id, "buyer", None, &app.config.jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &TestApp, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: &TestApp, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(app: &TestApp, uri: &str, token: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_empty_auth(app: &TestApp, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST `body` as-is, with a content type only when one is given.
pub async fn post_raw_auth(
    app: &TestApp,
    uri: &str,
    token: &str,
    content_type: Option<&str>,
    body: &[u8],
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    send(app, builder.body(Body::from(body.to_vec())).unwrap()).await
}

/// POST a single-file multipart form with the file in field `field`.
pub async fn post_file_auth(
    app: &TestApp,
    uri: &str,
    token: &str,
    field: &str,
    content_type: &str,
    bytes: &[u8],
) -> Response<Body> {
    let boundary = "motorlist-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"car\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
