//! Home page integration tests.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, seed_figure, seed_period, seed_site};
use sqlx::PgPool;

/// An empty catalogue renders zero counts and empty showcases.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_home_empty(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["periods_count"], 0);
    assert_eq!(json["figures_count"], 0);
    assert_eq!(json["sites_count"], 0);
    assert_eq!(json["recent_figures"].as_array().unwrap().len(), 0);
    assert_eq!(json["featured_sites"].as_array().unwrap().len(), 0);
}

/// The showcase holds the three newest figures (newest first) and the first
/// three sites by name.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_home_counts_and_showcase(pool: PgPool) {
    let period = seed_period(&pool, "Timurid Empire", 1370).await;
    for name in ["Amir Timur", "Ulugh Beg", "Babur", "Navoi"] {
        seed_figure(&pool, name, period.id).await;
    }
    seed_site(&pool, "Registan", &[period.id], &[]).await;
    seed_site(&pool, "Ark Fortress", &[], &[]).await;

    let app = build_test_app(pool);
    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["periods_count"], 1);
    assert_eq!(json["figures_count"], 4);
    assert_eq!(json["sites_count"], 2);

    // Newest three figures, most recent first.
    let recent = json["recent_figures"].as_array().unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0]["name"], "Navoi");
    assert_eq!(recent[1]["name"], "Babur");
    assert_eq!(recent[2]["name"], "Ulugh Beg");

    // Featured sites in name order.
    let featured = json["featured_sites"].as_array().unwrap();
    assert_eq!(featured.len(), 2);
    assert_eq!(featured[0]["name"], "Ark Fortress");
    assert_eq!(featured[1]["name"], "Registan");
}
