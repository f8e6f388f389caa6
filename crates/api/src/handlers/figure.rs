//! Handlers for the `/figures/` pages.

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use meros_core::catalog::{role_choices, Choice};
use meros_core::error::CoreError;
use meros_core::forms::figure::{validate, FigureForm};
use meros_core::forms::FormErrors;
use meros_core::storage::FIGURE_IMAGE_DIR;
use meros_core::types::DbId;
use meros_db::models::figure::{CreateFigure, HistoricalFigure};
use meros_db::models::site::HistoricalSite;
use meros_db::models::time_period::TimePeriod;
use meros_db::repositories::{FigureRepo, PeriodRepo, SiteRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::form::SubmittedForm;
use crate::handlers::store_upload;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Context for the figure detail page: the record, its owning period, and
/// the sites that reference it.
#[derive(Debug, Serialize)]
pub struct FigureDetail {
    pub figure: HistoricalFigure,
    pub period: Option<TimePeriod>,
    pub sites: Vec<HistoricalSite>,
}

/// Context for the figure create/edit form: role choices and the selectable
/// periods alongside the record being edited (if any).
#[derive(Debug, Serialize)]
pub struct FigureFormPage {
    pub title: &'static str,
    pub roles: Vec<Choice>,
    pub periods: Vec<TimePeriod>,
    pub figure: Option<HistoricalFigure>,
}

/// Context for the delete confirmation page.
#[derive(Debug, Serialize)]
pub struct FigureDeletePage {
    pub figure: HistoricalFigure,
}

/// GET /figures/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<HistoricalFigure>>> {
    let figures = FigureRepo::list(&state.pool).await?;
    Ok(Json(figures))
}

/// GET /figures/{id}/
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FigureDetail>> {
    let figure = find_figure(&state, id).await?;
    let period = PeriodRepo::find_by_id(&state.pool, figure.time_period_id).await?;
    let sites = SiteRepo::list_by_figure(&state.pool, id).await?;

    Ok(Json(FigureDetail {
        figure,
        period,
        sites,
    }))
}

/// GET /figures/create/
pub async fn create_form(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<FigureFormPage>> {
    let periods = PeriodRepo::list(&state.pool).await?;
    Ok(Json(FigureFormPage {
        title: "Add New Figure",
        roles: role_choices(),
        periods,
        figure: None,
    }))
}

/// POST /figures/create/
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    SubmittedForm(mut data): SubmittedForm,
) -> AppResult<Redirect> {
    let form = validate(&data)?;
    check_period_exists(&state, &form).await?;
    let image = store_upload(&state, &mut data, FIGURE_IMAGE_DIR).await?;

    let input = CreateFigure {
        name: form.name,
        birth_year: form.birth_year,
        death_year: form.death_year,
        biography: form.biography,
        role: form.role,
        time_period_id: form.time_period,
        image,
        created_by: Some(user.user_id),
    };
    let figure = FigureRepo::create(&state.pool, &input).await?;

    tracing::info!(figure_id = figure.id, user_id = user.user_id, name = %figure.name, "Historical figure created");
    Ok(Redirect::to(&format!("/figures/{}/", figure.id)))
}

/// GET /figures/{id}/edit/
pub async fn edit_form(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FigureFormPage>> {
    let figure = find_figure(&state, id).await?;
    let periods = PeriodRepo::list(&state.pool).await?;
    Ok(Json(FigureFormPage {
        title: "Edit Figure",
        roles: role_choices(),
        periods,
        figure: Some(figure),
    }))
}

/// POST /figures/{id}/edit/
///
/// Full-field replace; an edit without a new upload keeps the stored image.
pub async fn edit(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    SubmittedForm(mut data): SubmittedForm,
) -> AppResult<Redirect> {
    let existing = find_figure(&state, id).await?;
    let form = validate(&data)?;
    check_period_exists(&state, &form).await?;
    let image = match store_upload(&state, &mut data, FIGURE_IMAGE_DIR).await? {
        Some(path) => Some(path),
        None => existing.image,
    };

    let input = CreateFigure {
        name: form.name,
        birth_year: form.birth_year,
        death_year: form.death_year,
        biography: form.biography,
        role: form.role,
        time_period_id: form.time_period,
        image,
        created_by: existing.created_by,
    };
    FigureRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Figure",
            id,
        }))?;

    tracing::info!(figure_id = id, user_id = user.user_id, "Historical figure updated");
    Ok(Redirect::to(&format!("/figures/{id}/")))
}

/// GET /figures/{id}/delete/
///
/// First phase of deletion: render the confirmation context.
pub async fn delete_confirm(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FigureDeletePage>> {
    let figure = find_figure(&state, id).await?;
    Ok(Json(FigureDeletePage { figure }))
}

/// POST /figures/{id}/delete/
///
/// Second phase: execute. Site associations go with the figure; the sites
/// themselves are untouched.
pub async fn destroy(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    let deleted = FigureRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Figure",
            id,
        }));
    }

    tracing::info!(figure_id = id, user_id = user.user_id, "Historical figure deleted");
    Ok(Redirect::to("/figures/"))
}

/// Look up a figure or fail with NotFound.
async fn find_figure(state: &AppState, id: DbId) -> AppResult<HistoricalFigure> {
    FigureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Figure",
            id,
        }))
}

/// Reject a validated form whose selected period no longer exists.
async fn check_period_exists(state: &AppState, form: &FigureForm) -> AppResult<()> {
    if PeriodRepo::find_by_id(&state.pool, form.time_period)
        .await?
        .is_none()
    {
        let mut errors = FormErrors::default();
        errors.add("time_period", "Select a valid choice.");
        return Err(errors.into());
    }
    Ok(())
}
