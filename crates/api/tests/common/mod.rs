#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use petstore_core::loader::TagResolution;
use petstore_core::memory::InMemoryPetStore;
use petstore_core::service::PetService;
use petstore_core::store::PetStore;
use petstore_db::PgPetStore;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use petstore_api::auth::jwt::{generate_token, JwtConfig};
use petstore_api::config::ServerConfig;
use petstore_api::router::build_app_router;
use petstore_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: 1024 * 1024,
        db_max_connections: 5,
        store_timeout_ms: 3000,
        tag_resolution: TagResolution::BestEffort,
        cookie_domain: None,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            issuer: "petstore".to_string(),
            audience: "petstore".to_string(),
            expiry_mins: 15,
        },
    }
}

/// Pool that never connects successfully; any query fails fast.
pub fn unreachable_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(250))
        .connect_lazy("postgres://petstore@127.0.0.1:1/unused")
        .expect("lazy pool options should be valid")
}

fn build_app(pool: PgPool, store: Arc<dyn PetStore>, config: ServerConfig) -> Router {
    let pets = Arc::new(PetService::new(store, config.tag_resolution));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        pets,
    };
    build_app_router(state, &config)
}

/// Full router over an in-memory pet store and an unreachable database.
///
/// Suitable for pet routes and anything that does not touch orders or users.
pub fn build_test_app(store: Arc<InMemoryPetStore>) -> Router {
    build_app(unreachable_pool(), store, test_config())
}

/// Same as [`build_test_app`] with a custom configuration.
pub fn build_test_app_with_config(store: Arc<InMemoryPetStore>, config: ServerConfig) -> Router {
    build_app(unreachable_pool(), store, config)
}

/// Full router over a real database, with pets stored through `PgPetStore`.
pub fn build_db_app(pool: PgPool) -> Router {
    let store = Arc::new(PgPetStore::new(pool.clone()));
    build_app(pool, store, test_config())
}

/// A valid bearer token for `username` under [`test_config`].
pub fn token_for(username: &str) -> String {
    generate_token(username, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body, None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_request(app, Method::POST, uri, body, Some(token)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, body, None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    json_request(app, Method::PUT, uri, body, Some(token)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
