pub mod auth;
pub mod figures;
pub mod health;
pub mod periods;
pub mod sites;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                           home page context (counts + showcase)
/// /healthz                    service and database health
///
/// /register/                  register (GET form, POST submit)
/// /login/                     login (GET form, POST submit)
/// /logout/                    logout (POST)
/// /profile/                   current user's contributions (auth)
///
/// /periods/                   list
/// /periods/create/            create (auth)
/// /periods/{id}/              detail
/// /periods/{id}/edit/         edit (auth)
/// /periods/{id}/delete/       two-phase delete (auth)
///
/// /figures/                   same shape as periods
/// /sites/                     same shape as periods
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home::home))
        .merge(health::router())
        .merge(auth::router())
        .merge(periods::router())
        .merge(figures::router())
        .merge(sites::router())
}
