//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use meros_core::error::CoreError;
use meros_core::types::DbId;

use crate::auth::session::{token_from_cookie_header, validate_token};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the `session` cookie or a Bearer token.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication; requests without a valid session are redirected to the
/// login page by the [`AppError`] rejection.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("No session credentials".into()))
            })?;

        let claims = validate_token(token, &state.config.session).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

/// Token from an `Authorization: Bearer <token>` header, if present.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Token from the `session` cookie, if present.
fn cookie_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(token_from_cookie_header)
}
