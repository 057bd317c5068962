//! Shared helpers for HTTP integration tests.
//!
//! Builds the production router over a per-test SQLite pool with a token
//! verifier whose key cache is preloaded from `tests/fixtures/jwks.json`,
//! and mints RS256 tokens with the matching fixture key.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use casting_api::auth::jwt::{AuthConfig, TokenVerifier};
use casting_api::config::ServerConfig;
use casting_api::router::build_app_router;
use casting_api::state::AppState;

pub const PRIMARY_PEM: &str = include_str!("../fixtures/primary_rsa.pem");
pub const ROGUE_PEM: &str = include_str!("../fixtures/rogue_rsa.pem");
pub const FIXTURE_JWKS: &str = include_str!("../fixtures/jwks.json");
pub const KID: &str = "casting-test-key";
pub const ISSUER: &str = "https://casting.example.com/";
pub const AUDIENCE: &str = "casting-api";
pub const SUBJECT: &str = "auth0|casting-director";

/// Every scope the API knows about.
pub const ALL_SCOPES: &[&str] = &[
    "post:actors",
    "post:movies",
    "patch:actors",
    "patch:movies",
    "delete:actors",
    "delete:movies",
];

/// Auth settings pointing at an unroutable JWKS URL, so any key not
/// preloaded into the cache is reported as missing.
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        issuer: ISSUER.to_string(),
        audience: AUDIENCE.to_string(),
        jwks_url: "http://127.0.0.1:9/.well-known/jwks.json".to_string(),
        scopes_claim: "permissions".to_string(),
        leeway_secs: 0,
        key_cache_ttl_secs: 60,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        reset_database: false,
        auth: test_auth_config(),
    }
}

/// A verifier whose key cache already holds the fixture key.
pub fn test_verifier(config: AuthConfig) -> TokenVerifier {
    let verifier = TokenVerifier::new(config).unwrap();
    let set: JwkSet = serde_json::from_str(FIXTURE_JWKS).unwrap();
    assert_eq!(verifier.keys().insert_key_set(&set), 1);
    verifier
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        verifier: Arc::new(test_verifier(config.auth.clone())),
    };
    build_app_router(state, &config)
}

/// Default claims for a token carrying `scopes`.
pub fn claims_with(scopes: &[&str]) -> Value {
    let now = chrono::Utc::now().timestamp();
    json!({
        "sub": SUBJECT,
        "iss": ISSUER,
        "aud": AUDIENCE,
        "iat": now,
        "exp": now + 600,
        "permissions": scopes,
    })
}

/// Sign `claims` with the given PEM key and optional `kid`.
pub fn sign(pem: &str, kid: Option<&str>, claims: &Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);
    encode(
        &header,
        claims,
        &EncodingKey::from_rsa_pem(pem.as_bytes()).unwrap(),
    )
    .unwrap()
}

/// A valid token signed by the fixture key.
pub fn mint_token(scopes: &[&str]) -> String {
    sign(PRIMARY_PEM, Some(KID), &claims_with(scopes))
}

/// `Bearer <token>` for a valid token with `scopes`.
pub fn bearer(scopes: &[&str]) -> String {
    format!("Bearer {}", mint_token(scopes))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, auth: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(auth), Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, auth: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(auth), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, auth: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(auth), None).await
}

/// Send a request whose body is raw bytes with a JSON content type.
pub async fn send_raw(
    app: Router,
    method: Method,
    uri: &str,
    auth: &str,
    body: &'static str,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", auth)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
