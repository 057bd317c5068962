//! Integration tests for bearer-token verification and scope checks on
//! the mutating routes.
//!
//! A rejected request must never touch the store, whatever its body says.

mod common;

use axum::http::{Method, StatusCode};
use casting_db::models::actor::CreateActor;
use casting_db::repositories::{ActorRepo, MovieRepo};
use common::{
    bearer, body_json, claims_with, delete, patch_json, post_json, send, sign, ALL_SCOPES, KID,
    PRIMARY_PEM, ROGUE_PEM,
};
use serde_json::json;
use sqlx::SqlitePool;

async fn seed_actor(pool: &SqlitePool, name: &str) -> i64 {
    let input = CreateActor {
        name: Some(name.to_string()),
        ..Default::default()
    };
    ActorRepo::create(pool, &input).await.unwrap().id
}

async fn assert_auth_error(response: axum::response::Response, status: StatusCode) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], status.as_u16());
    assert_eq!(json["message"], "Authentication error");
}

// ---------------------------------------------------------------------------
// Missing or unusable credentials -> 401
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_post_without_authorization_header_is_401(pool: SqlitePool) {
    let app = common::build_test_app(pool.clone());
    let response = send(
        app,
        Method::POST,
        "/actors",
        None,
        Some(json!({"name": "Anonymous"})),
    )
    .await;

    assert_auth_error(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(ActorRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_bearer_schemes_are_401(pool: SqlitePool) {
    let token = common::mint_token(ALL_SCOPES);
    for header in [
        format!("Basic {token}"),
        token.clone(),
        format!("Bearer {token} extra"),
        "Bearer".to_string(),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/movies", &header, json!({"title": "Her"})).await;
        assert_auth_error(response, StatusCode::UNAUTHORIZED).await;
    }
    assert_eq!(MovieRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lowercase_bearer_scheme_is_accepted(pool: SqlitePool) {
    let header = format!("bearer {}", common::mint_token(&["post:movies"]));
    let app = common::build_test_app(pool);
    let response = post_json(app, "/movies", &header, json!({"title": "Her"})).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_token_is_401(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/actors",
        "Bearer not-a-jwt",
        json!({"name": "Nobody"}),
    )
    .await;
    assert_auth_error(response, StatusCode::UNAUTHORIZED).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_forged_signature_is_401_even_with_every_scope(pool: SqlitePool) {
    let id = seed_actor(&pool, "Cillian Murphy").await;
    let forged = sign(ROGUE_PEM, Some(KID), &claims_with(ALL_SCOPES));

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/actors/{id}"), &format!("Bearer {forged}")).await;

    assert_auth_error(response, StatusCode::UNAUTHORIZED).await;
    assert!(ActorRepo::find_by_id(&pool, id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_expired_token_is_401(pool: SqlitePool) {
    let mut claims = claims_with(ALL_SCOPES);
    claims["exp"] = json!(chrono::Utc::now().timestamp() - 300);
    let token = sign(PRIMARY_PEM, Some(KID), &claims);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/actors",
        &format!("Bearer {token}"),
        json!({"name": "Late Arrival"}),
    )
    .await;
    assert_auth_error(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(ActorRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_wrong_audience_or_issuer_is_401(pool: SqlitePool) {
    for (claim, value) in [
        ("aud", "some-other-api"),
        ("iss", "https://impostor.example.com/"),
    ] {
        let mut claims = claims_with(ALL_SCOPES);
        claims[claim] = json!(value);
        let token = sign(PRIMARY_PEM, Some(KID), &claims);

        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/movies",
            &format!("Bearer {token}"),
            json!({"title": "Mismatch"}),
        )
        .await;
        assert_auth_error(response, StatusCode::UNAUTHORIZED).await;
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_kid_is_401(pool: SqlitePool) {
    let token = sign(PRIMARY_PEM, Some("rotated-away"), &claims_with(ALL_SCOPES));

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/movies",
        &format!("Bearer {token}"),
        json!({"title": "Ghost"}),
    )
    .await;
    assert_auth_error(response, StatusCode::UNAUTHORIZED).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_symmetric_algorithm_is_401(pool: SqlitePool) {
    let mut header = jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256);
    header.kid = Some(KID.to_string());
    let token = jsonwebtoken::encode(
        &header,
        &claims_with(ALL_SCOPES),
        &jsonwebtoken::EncodingKey::from_secret(b"guessable"),
    )
    .unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/actors",
        &format!("Bearer {token}"),
        json!({"name": "HMAC"}),
    )
    .await;
    assert_auth_error(response, StatusCode::UNAUTHORIZED).await;
}

// ---------------------------------------------------------------------------
// Valid token, wrong scope -> 403
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_scope_is_403_and_never_mutates(pool: SqlitePool) {
    let id = seed_actor(&pool, "Pedro Pascal").await;
    let casting_assistant = bearer(&[]);
    let other_scopes = bearer(&["post:movies", "patch:movies", "delete:movies"]);

    for auth in [&casting_assistant, &other_scopes] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/actors", auth, json!({"name": "New Face"})).await;
        assert_auth_error(response, StatusCode::FORBIDDEN).await;

        let app = common::build_test_app(pool.clone());
        let response = patch_json(
            app,
            &format!("/actors/{id}"),
            auth,
            json!({"name": "Renamed"}),
        )
        .await;
        assert_auth_error(response, StatusCode::FORBIDDEN).await;

        let app = common::build_test_app(pool.clone());
        let response = delete(app, &format!("/actors/{id}"), auth).await;
        assert_auth_error(response, StatusCode::FORBIDDEN).await;
    }

    assert_eq!(ActorRepo::count(&pool).await.unwrap(), 1);
    let stored = ActorRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Pedro Pascal");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_scope_is_checked_before_body_validation(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/movies", &bearer(&["post:actors"]), json!({})).await;
    assert_auth_error(response, StatusCode::FORBIDDEN).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_auth_is_checked_before_record_lookup(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/movies/9999", &bearer(&["delete:actors"])).await;
    assert_auth_error(response, StatusCode::FORBIDDEN).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_routes_need_no_token(pool: SqlitePool) {
    seed_actor(&pool, "Jenna Ortega").await;
    let app = common::build_test_app(pool);
    let response = common::get(app, "/actors").await;
    assert_eq!(response.status(), StatusCode::OK);
}
