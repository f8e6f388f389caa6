//! Historical site routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::site;
use crate::state::AppState;

/// Routes for the site pages.
///
/// ```text
/// GET  /sites/              list
/// GET  /sites/create/       create form context (requires auth)
/// POST /sites/create/       create (requires auth)
/// GET  /sites/{id}/         detail
/// GET  /sites/{id}/edit/    edit form context (requires auth)
/// POST /sites/{id}/edit/    update (requires auth)
/// GET  /sites/{id}/delete/  delete confirmation (requires auth)
/// POST /sites/{id}/delete/  delete (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sites/", get(site::list))
        .route("/sites/create/", get(site::create_form).post(site::create))
        .route("/sites/{id}/", get(site::detail))
        .route("/sites/{id}/edit/", get(site::edit_form).post(site::edit))
        .route(
            "/sites/{id}/delete/",
            get(site::delete_confirm).post(site::destroy),
        )
}
