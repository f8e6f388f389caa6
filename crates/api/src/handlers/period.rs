//! Handlers for the `/periods/` pages.

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use meros_core::error::CoreError;
use meros_core::forms::period::validate;
use meros_core::storage::PERIOD_IMAGE_DIR;
use meros_core::types::DbId;
use meros_db::models::figure::HistoricalFigure;
use meros_db::models::site::HistoricalSite;
use meros_db::models::time_period::{CreateTimePeriod, TimePeriod};
use meros_db::repositories::{FigureRepo, PeriodRepo, SiteRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::form::SubmittedForm;
use crate::handlers::store_upload;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Context for the period detail page: the record plus its relationship graph.
#[derive(Debug, Serialize)]
pub struct PeriodDetail {
    pub period: TimePeriod,
    pub figures: Vec<HistoricalFigure>,
    pub sites: Vec<HistoricalSite>,
}

/// Context for the period create/edit form.
#[derive(Debug, Serialize)]
pub struct PeriodFormPage {
    pub title: &'static str,
    /// The record being edited; `None` on the create form.
    pub period: Option<TimePeriod>,
}

/// Context for the delete confirmation page.
#[derive(Debug, Serialize)]
pub struct PeriodDeletePage {
    pub period: TimePeriod,
}

/// GET /periods/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TimePeriod>>> {
    let periods = PeriodRepo::list(&state.pool).await?;
    Ok(Json(periods))
}

/// GET /periods/{id}/
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PeriodDetail>> {
    let period = find_period(&state, id).await?;
    let figures = FigureRepo::list_by_period(&state.pool, id).await?;
    let sites = SiteRepo::list_by_period(&state.pool, id).await?;

    Ok(Json(PeriodDetail {
        period,
        figures,
        sites,
    }))
}

/// GET /periods/create/
pub async fn create_form(_user: AuthUser) -> Json<PeriodFormPage> {
    Json(PeriodFormPage {
        title: "Add New Period",
        period: None,
    })
}

/// POST /periods/create/
///
/// Validates the submitted form, persists with the current user as creator,
/// and redirects to the new detail page.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    SubmittedForm(mut data): SubmittedForm,
) -> AppResult<Redirect> {
    let form = validate(&data)?;
    let image = store_upload(&state, &mut data, PERIOD_IMAGE_DIR).await?;

    let input = CreateTimePeriod {
        name: form.name,
        start_year: form.start_year,
        end_year: form.end_year,
        description: form.description,
        image,
        created_by: Some(user.user_id),
    };
    let period = PeriodRepo::create(&state.pool, &input).await?;

    tracing::info!(period_id = period.id, user_id = user.user_id, name = %period.name, "Time period created");
    Ok(Redirect::to(&format!("/periods/{}/", period.id)))
}

/// GET /periods/{id}/edit/
pub async fn edit_form(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PeriodFormPage>> {
    let period = find_period(&state, id).await?;
    Ok(Json(PeriodFormPage {
        title: "Edit Period",
        period: Some(period),
    }))
}

/// POST /periods/{id}/edit/
///
/// Full-field replace; an edit without a new upload keeps the stored image.
pub async fn edit(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    SubmittedForm(mut data): SubmittedForm,
) -> AppResult<Redirect> {
    let existing = find_period(&state, id).await?;
    let form = validate(&data)?;
    let image = match store_upload(&state, &mut data, PERIOD_IMAGE_DIR).await? {
        Some(path) => Some(path),
        None => existing.image,
    };

    let input = CreateTimePeriod {
        name: form.name,
        start_year: form.start_year,
        end_year: form.end_year,
        description: form.description,
        image,
        created_by: existing.created_by,
    };
    PeriodRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Period",
            id,
        }))?;

    tracing::info!(period_id = id, user_id = user.user_id, "Time period updated");
    Ok(Redirect::to(&format!("/periods/{id}/")))
}

/// GET /periods/{id}/delete/
///
/// First phase of deletion: render the confirmation context.
pub async fn delete_confirm(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PeriodDeletePage>> {
    let period = find_period(&state, id).await?;
    Ok(Json(PeriodDeletePage { period }))
}

/// POST /periods/{id}/delete/
///
/// Second phase: execute. The store cascades the delete to the period's
/// figures and drops its site associations.
pub async fn destroy(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    let deleted = PeriodRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Period",
            id,
        }));
    }

    tracing::info!(period_id = id, user_id = user.user_id, "Time period deleted");
    Ok(Redirect::to("/periods/"))
}

/// Look up a period or fail with NotFound.
async fn find_period(state: &AppState, id: DbId) -> AppResult<TimePeriod> {
    PeriodRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Period",
            id,
        }))
}
