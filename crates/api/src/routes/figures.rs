//! Historical figure routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::figure;
use crate::state::AppState;

/// Routes for the figure pages.
///
/// ```text
/// GET  /figures/              list
/// GET  /figures/create/       create form context (requires auth)
/// POST /figures/create/       create (requires auth)
/// GET  /figures/{id}/         detail
/// GET  /figures/{id}/edit/    edit form context (requires auth)
/// POST /figures/{id}/edit/    update (requires auth)
/// GET  /figures/{id}/delete/  delete confirmation (requires auth)
/// POST /figures/{id}/delete/  delete (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/figures/", get(figure::list))
        .route(
            "/figures/create/",
            get(figure::create_form).post(figure::create),
        )
        .route("/figures/{id}/", get(figure::detail))
        .route(
            "/figures/{id}/edit/",
            get(figure::edit_form).post(figure::edit),
        )
        .route(
            "/figures/{id}/delete/",
            get(figure::delete_confirm).post(figure::destroy),
        )
}
