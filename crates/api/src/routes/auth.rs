//! Account routes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Account routes, mounted at the root.
///
/// ```text
/// GET  /register/   registration form context (public)
/// POST /register/   create account, start session (public)
/// GET  /login/      login form context (public)
/// POST /login/      verify credentials, start session (public)
/// POST /logout/     clear session (public; clears whatever cookie is held)
/// GET  /profile/    current user's account and contributions (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register/", get(auth::register_form).post(auth::register))
        .route("/login/", get(auth::login_form).post(auth::login))
        .route("/logout/", post(auth::logout))
        .route("/profile/", get(auth::profile))
}
