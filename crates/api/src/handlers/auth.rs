//! Registration, login, logout, and the profile page.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Redirect};
use axum::{Form, Json};
use meros_core::error::CoreError;
use meros_core::forms::{FormErrors, MSG_REQUIRED};
use meros_db::models::figure::HistoricalFigure;
use meros_db::models::site::HistoricalSite;
use meros_db::models::time_period::TimePeriod;
use meros_db::models::user::{CreateUser, UserResponse};
use meros_db::repositories::{FigureRepo, PeriodRepo, SiteRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::session::{clear_session_cookie, generate_session_token, session_cookie};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Registration form payload. Field names follow the browser form.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 3, max = 150, message = "Username must be 3-150 characters"))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    pub password1: String,
    pub password2: String,
}

/// Login form payload.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Context for the registration form page.
#[derive(Debug, Serialize)]
pub struct RegisterPage {
    pub title: &'static str,
}

/// Context for the login form page.
#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub title: &'static str,
}

/// Context for the profile page: the account plus everything it contributed.
#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub user: UserResponse,
    pub periods: Vec<TimePeriod>,
    pub figures: Vec<HistoricalFigure>,
    pub sites: Vec<HistoricalSite>,
}

/// GET /register/
pub async fn register_form() -> Json<RegisterPage> {
    Json(RegisterPage { title: "Register" })
}

/// POST /register/
///
/// Creates the account and starts a session in one step: the response sets
/// the session cookie and redirects home. A taken username or email surfaces
/// as 409 via the unique constraints.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> AppResult<impl IntoResponse> {
    validate_register(&form)?;

    let password_hash = hash_password(&form.password1)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let input = CreateUser {
        username: form.username,
        email: form.email,
        password_hash,
    };
    let user = UserRepo::create(&state.pool, &input).await?;

    let token = generate_session_token(user.id, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    let cookie = session_cookie(&token, &state.config.session);

    tracing::info!(user_id = user.id, username = %user.username, "Account registered");
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to("/")))
}

/// GET /login/
pub async fn login_form() -> Json<LoginPage> {
    Json(LoginPage { title: "Login" })
}

/// POST /login/
///
/// An unknown username and a wrong password fail identically, as a
/// form-level error.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_username(&state.pool, &form.username).await?;

    let verified = match &user {
        Some(user) => verify_password(&form.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?,
        None => false,
    };
    let Some(user) = user.filter(|_| verified) else {
        tracing::debug!(username = %form.username, "Login rejected");
        let mut errors = FormErrors::default();
        errors.add("__all__", "Invalid username or password.");
        return Err(errors.into());
    };

    let token = generate_session_token(user.id, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    let cookie = session_cookie(&token, &state.config.session);

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to("/")))
}

/// POST /logout/
///
/// Clears the session cookie unconditionally; an expired or absent session
/// still logs out cleanly.
pub async fn logout() -> impl IntoResponse {
    tracing::debug!("Session cleared");
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Redirect::to("/"),
    )
}

/// GET /profile/
pub async fn profile(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ProfilePage>> {
    let account = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::Unauthorized(
            "Session refers to a deleted account".into(),
        )))?;

    let periods = PeriodRepo::list_by_creator(&state.pool, user.user_id).await?;
    let figures = FigureRepo::list_by_creator(&state.pool, user.user_id).await?;
    let sites = SiteRepo::list_by_creator(&state.pool, user.user_id).await?;

    Ok(Json(ProfilePage {
        user: account.into(),
        periods,
        figures,
        sites,
    }))
}

/// Run registration checks, collecting every failure into one error map.
fn validate_register(form: &RegisterForm) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();

    if form.username.trim().is_empty() {
        errors.add("username", MSG_REQUIRED);
    }
    if let Err(report) = form.validate() {
        for (field, field_errors) in report.field_errors() {
            for err in field_errors {
                let message = err
                    .message
                    .as_deref()
                    .unwrap_or("Enter a valid value.")
                    .to_string();
                errors.add(&field, message);
            }
        }
    }
    if let Err(msg) = validate_password_strength(&form.password1) {
        errors.add("password1", msg);
    }
    if form.password1 != form.password2 {
        errors.add("password2", "The two password fields didn't match.");
    }

    errors.into_result(())
}
