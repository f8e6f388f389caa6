//! Historical figure page integration tests.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{
    assert_redirect, auth_token, body_json, build_test_app, create_test_user, get, get_auth,
    post_form_auth, seed_figure, seed_period, seed_site,
};
use meros_core::catalog::FigureRole;
use meros_db::repositories::{FigureRepo, SiteRepo};
use sqlx::PgPool;

/// The figure list is public and ordered by birth year, unknown years last.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_ordered_by_birth_year(pool: PgPool) {
    let period = seed_period(&pool, "Timurid Empire", 1370).await;
    for (name, birth_year) in [
        ("Ulugh Beg", Some(1394)),
        ("Unknown Scribe", None),
        ("Amir Timur", Some(1336)),
    ] {
        let input = meros_db::models::figure::CreateFigure {
            name: name.to_string(),
            birth_year,
            death_year: None,
            biography: format!("{name} biography"),
            role: FigureRole::Other,
            time_period_id: period.id,
            image: None,
            created_by: None,
        };
        FigureRepo::create(&pool, &input).await.unwrap();
    }

    let app = build_test_app(pool);
    let response = get(app, "/figures/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Amir Timur", "Ulugh Beg", "Unknown Scribe"]);
}

/// The detail page bundles the figure with its period and the sites that
/// reference it.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detail_includes_relationships(pool: PgPool) {
    let period = seed_period(&pool, "Timurid Empire", 1370).await;
    let figure = seed_figure(&pool, "Ulugh Beg", period.id).await;
    seed_site(&pool, "Ulugh Beg Observatory", &[], &[figure.id]).await;

    let app = build_test_app(pool);
    let response = get(app, &format!("/figures/{}/", figure.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["figure"]["name"], "Ulugh Beg");
    assert_eq!(json["period"]["name"], "Timurid Empire");
    assert_eq!(json["sites"][0]["name"], "Ulugh Beg Observatory");
}

/// The create form offers role choices and the selectable periods.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_form_context(pool: PgPool) {
    let (user, _password) = create_test_user(&pool, "editor").await;
    seed_period(&pool, "Timurid Empire", 1370).await;

    let app = build_test_app(pool);
    let response = get_auth(app, "/figures/create/", &auth_token(user.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let roles = json["roles"].as_array().unwrap();
    assert!(roles.iter().any(|c| c["value"] == "ruler"));
    assert!(roles.iter().any(|c| c["value"] == "other"));
    assert_eq!(json["periods"][0]["name"], "Timurid Empire");
    assert!(json["figure"].is_null());
}

/// An unauthenticated create attempt is sent to the login page and persists
/// nothing.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_auth(pool: PgPool) {
    let period = seed_period(&pool, "Timurid Empire", 1370).await;
    let period_id = period.id.to_string();

    let app = build_test_app(pool.clone());
    let response = common::post_form(
        app,
        "/figures/create/",
        &[
            ("name", "Ulugh Beg"),
            ("biography", "Astronomer king of Samarkand."),
            ("time_period", &period_id),
        ],
    )
    .await;

    assert_eq!(assert_redirect(&response), "/login/");
    assert_eq!(FigureRepo::count(&pool).await.unwrap(), 0);
}

/// A valid create persists the record and redirects to the detail page.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_success(pool: PgPool) {
    let (user, _password) = create_test_user(&pool, "editor").await;
    let period = seed_period(&pool, "Timurid Empire", 1370).await;
    let period_id = period.id.to_string();

    let app = build_test_app(pool.clone());
    let response = post_form_auth(
        app,
        "/figures/create/",
        &[
            ("name", "Ulugh Beg"),
            ("birth_year", "1394"),
            ("death_year", "1449"),
            ("biography", "Astronomer king of Samarkand."),
            ("role", "scientist"),
            ("time_period", &period_id),
        ],
        &auth_token(user.id),
    )
    .await;

    let location = assert_redirect(&response);
    let figures = FigureRepo::list(&pool).await.unwrap();
    assert_eq!(figures.len(), 1);
    assert_eq!(location, format!("/figures/{}/", figures[0].id));
    assert_matches!(figures[0].role, FigureRole::Scientist);
    assert_eq!(figures[0].time_period_id, period.id);
    assert_eq!(figures[0].created_by, Some(user.id));
}

/// Omitting the role falls back to `other`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_role_defaults_to_other(pool: PgPool) {
    let (user, _password) = create_test_user(&pool, "editor").await;
    let period = seed_period(&pool, "Timurid Empire", 1370).await;
    let period_id = period.id.to_string();

    let app = build_test_app(pool.clone());
    let response = post_form_auth(
        app,
        "/figures/create/",
        &[
            ("name", "Unknown Scribe"),
            ("biography", "Name lost to history."),
            ("time_period", &period_id),
        ],
        &auth_token(user.id),
    )
    .await;

    assert_redirect(&response);
    let figures = FigureRepo::list(&pool).await.unwrap();
    assert_matches!(figures[0].role, FigureRole::Other);
    assert_eq!(figures[0].birth_year, None);
}

/// A non-numeric birth year is rejected with a field error and nothing is
/// stored.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_garbage_birth_year(pool: PgPool) {
    let (user, _password) = create_test_user(&pool, "editor").await;
    let period = seed_period(&pool, "Timurid Empire", 1370).await;
    let period_id = period.id.to_string();

    let app = build_test_app(pool.clone());
    let response = post_form_auth(
        app,
        "/figures/create/",
        &[
            ("name", "Ulugh Beg"),
            ("birth_year", "not-a-number"),
            ("biography", "Astronomer king of Samarkand."),
            ("role", "scientist"),
            ("time_period", &period_id),
        ],
        &auth_token(user.id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["birth_year"][0], "Enter a whole year, e.g. 1370.");
    assert_eq!(FigureRepo::count(&pool).await.unwrap(), 0);
}

/// Selecting a period that no longer exists fails field validation rather
/// than surfacing a database error.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_stale_period_choice(pool: PgPool) {
    let (user, _password) = create_test_user(&pool, "editor").await;

    let app = build_test_app(pool.clone());
    let response = post_form_auth(
        app,
        "/figures/create/",
        &[
            ("name", "Ulugh Beg"),
            ("biography", "Astronomer king of Samarkand."),
            ("time_period", "9999"),
        ],
        &auth_token(user.id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"]["time_period"][0], "Select a valid choice.");
}

/// Deleting a figure removes its site associations but keeps the sites.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_keeps_sites(pool: PgPool) {
    let (user, _password) = create_test_user(&pool, "editor").await;
    let period = seed_period(&pool, "Timurid Empire", 1370).await;
    let figure = seed_figure(&pool, "Ulugh Beg", period.id).await;
    let site = seed_site(&pool, "Ulugh Beg Observatory", &[], &[figure.id]).await;

    let app = build_test_app(pool.clone());
    let response = post_form_auth(
        app,
        &format!("/figures/{}/delete/", figure.id),
        &[],
        &auth_token(user.id),
    )
    .await;
    assert_eq!(assert_redirect(&response), "/figures/");

    assert!(FigureRepo::find_by_id(&pool, figure.id).await.unwrap().is_none());
    assert!(
        SiteRepo::find_by_id(&pool, site.id).await.unwrap().is_some(),
        "the site must survive the figure's deletion"
    );
    let remaining = FigureRepo::list_by_site(&pool, site.id).await.unwrap();
    assert!(remaining.is_empty(), "the association must be gone");
}
