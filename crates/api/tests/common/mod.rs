//! Shared helpers for HTTP-level integration tests.
//!
//! `build_test_app` goes through [`meros_api::router::build_app_router`] so
//! tests exercise the same middleware stack that production uses.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use meros_api::auth::password::hash_password;
use meros_api::auth::session::{generate_session_token, SessionConfig};
use meros_api::config::ServerConfig;
use meros_api::state::AppState;
use meros_core::catalog::{City, FigureRole};
use meros_core::types::DbId;
use meros_db::models::figure::{CreateFigure, HistoricalFigure};
use meros_db::models::site::{CreateSite, HistoricalSite};
use meros_db::models::time_period::{CreateTimePeriod, TimePeriod};
use meros_db::models::user::{CreateUser, User};
use meros_db::repositories::{FigureRepo, PeriodRepo, SiteRepo, UserRepo};

/// Signing secret shared by the test config and [`auth_token`].
const TEST_SECRET: &str = "integration-test-secret-not-for-production";

/// Build a test `ServerConfig` with safe defaults and a throwaway media root.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_root: tempfile::tempdir()
            .expect("tempdir should be creatable")
            .keep(),
        session: SessionConfig {
            secret: TEST_SECRET.to_string(),
            session_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool).0
}

/// Like [`build_test_app`], also returning the config so tests can inspect
/// the media root.
pub fn build_test_app_with_config(pool: PgPool) -> (Router, ServerConfig) {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = meros_api::router::build_app_router(state, &config);
    (app, config)
}

/// Mint a session token for the given user id, signed with the test secret.
pub fn auth_token(user_id: DbId) -> String {
    let session = SessionConfig {
        secret: TEST_SECRET.to_string(),
        session_expiry_mins: 60,
    };
    generate_session_token(user_id, &session).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, path: &str) -> Response {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Send a GET request with a Bearer session token.
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// POST a urlencoded form body. Repeated names express multi-selects.
pub async fn post_form(app: Router, path: &str, fields: &[(&str, &str)]) -> Response {
    let body = serde_urlencoded::to_string(fields).expect("form should encode");
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// POST a urlencoded form body with a Bearer session token.
pub async fn post_form_auth(
    app: Router,
    path: &str,
    fields: &[(&str, &str)],
    token: &str,
) -> Response {
    let body = serde_urlencoded::to_string(fields).expect("form should encode");
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Boundary used by [`post_multipart_auth`].
const MULTIPART_BOUNDARY: &str = "----meros-test-boundary";

/// POST a `multipart/form-data` body with a Bearer session token. Text fields
/// come first; `image` optionally attaches a file part named `image`.
pub async fn post_multipart_auth(
    app: Router,
    path: &str,
    fields: &[(&str, &str)],
    image: Option<(&str, &[u8])>,
    token: &str,
) -> Response {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"\r\n\r\n\
                 {value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    use http_body_util::BodyExt;

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert a 303 redirect and return its Location header.
pub fn assert_redirect(response: &Response) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect should carry a Location header")
        .to_str()
        .expect("Location should be valid UTF-8")
        .to_string()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Create a test user directly in the database and return the row plus the
/// plaintext password used.
pub async fn create_test_user(pool: &PgPool, username: &str) -> (User, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hashed,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

/// Insert a period directly, bypassing the HTTP layer.
pub async fn seed_period(pool: &PgPool, name: &str, start_year: i32) -> TimePeriod {
    let input = CreateTimePeriod {
        name: name.to_string(),
        start_year,
        end_year: None,
        description: format!("{name} description"),
        image: None,
        created_by: None,
    };
    PeriodRepo::create(pool, &input)
        .await
        .expect("period creation should succeed")
}

/// Insert a figure directly, bypassing the HTTP layer.
pub async fn seed_figure(pool: &PgPool, name: &str, period_id: DbId) -> HistoricalFigure {
    let input = CreateFigure {
        name: name.to_string(),
        birth_year: Some(1336),
        death_year: Some(1405),
        biography: format!("{name} biography"),
        role: FigureRole::Ruler,
        time_period_id: period_id,
        image: None,
        created_by: None,
    };
    FigureRepo::create(pool, &input)
        .await
        .expect("figure creation should succeed")
}

/// Insert a site directly, bypassing the HTTP layer.
pub async fn seed_site(
    pool: &PgPool,
    name: &str,
    periods: &[DbId],
    figures: &[DbId],
) -> HistoricalSite {
    let input = CreateSite {
        name: name.to_string(),
        city: City::Samarkand,
        built_year: Some(1420),
        description: format!("{name} description"),
        image: None,
        created_by: None,
        time_periods: periods.to_vec(),
        related_figures: figures.to_vec(),
    };
    SiteRepo::create(pool, &input)
        .await
        .expect("site creation should succeed")
}
