//! Time period routes.
//!
//! Paths carry trailing slashes and are spelled out in full rather than
//! nested, because a nested router cannot express the bare `/periods/` root.

use axum::routing::get;
use axum::Router;

use crate::handlers::period;
use crate::state::AppState;

/// Routes for the period pages.
///
/// ```text
/// GET  /periods/              list
/// GET  /periods/create/       create form context (requires auth)
/// POST /periods/create/       create (requires auth)
/// GET  /periods/{id}/         detail
/// GET  /periods/{id}/edit/    edit form context (requires auth)
/// POST /periods/{id}/edit/    update (requires auth)
/// GET  /periods/{id}/delete/  delete confirmation (requires auth)
/// POST /periods/{id}/delete/  delete (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/periods/", get(period::list))
        .route(
            "/periods/create/",
            get(period::create_form).post(period::create),
        )
        .route("/periods/{id}/", get(period::detail))
        .route(
            "/periods/{id}/edit/",
            get(period::edit_form).post(period::edit),
        )
        .route(
            "/periods/{id}/delete/",
            get(period::delete_confirm).post(period::destroy),
        )
}
