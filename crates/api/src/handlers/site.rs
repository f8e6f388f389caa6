//! Handlers for the `/sites/` pages.

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use meros_core::catalog::{city_choices, Choice};
use meros_core::error::CoreError;
use meros_core::forms::site::{validate, SiteForm};
use meros_core::forms::FormErrors;
use meros_core::storage::SITE_IMAGE_DIR;
use meros_core::types::DbId;
use meros_db::models::figure::HistoricalFigure;
use meros_db::models::site::{CreateSite, HistoricalSite};
use meros_db::models::time_period::TimePeriod;
use meros_db::repositories::{FigureRepo, PeriodRepo, SiteRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::form::SubmittedForm;
use crate::handlers::store_upload;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Context for the site detail page: the record plus its relationship graph.
#[derive(Debug, Serialize)]
pub struct SiteDetail {
    pub site: HistoricalSite,
    pub time_periods: Vec<TimePeriod>,
    pub related_figures: Vec<HistoricalFigure>,
}

/// Context for the site create/edit form: city choices, the selectable
/// periods and figures, and (when editing) the record with its current
/// association ids.
#[derive(Debug, Serialize)]
pub struct SiteFormPage {
    pub title: &'static str,
    pub cities: Vec<Choice>,
    pub periods: Vec<TimePeriod>,
    pub figures: Vec<HistoricalFigure>,
    pub site: Option<HistoricalSite>,
    pub selected_periods: Vec<DbId>,
    pub selected_figures: Vec<DbId>,
}

/// Context for the delete confirmation page.
#[derive(Debug, Serialize)]
pub struct SiteDeletePage {
    pub site: HistoricalSite,
}

/// GET /sites/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<HistoricalSite>>> {
    let sites = SiteRepo::list(&state.pool).await?;
    Ok(Json(sites))
}

/// GET /sites/{id}/
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SiteDetail>> {
    let site = find_site(&state, id).await?;
    let time_periods = PeriodRepo::list_by_site(&state.pool, id).await?;
    let related_figures = FigureRepo::list_by_site(&state.pool, id).await?;

    Ok(Json(SiteDetail {
        site,
        time_periods,
        related_figures,
    }))
}

/// GET /sites/create/
pub async fn create_form(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<SiteFormPage>> {
    let periods = PeriodRepo::list(&state.pool).await?;
    let figures = FigureRepo::list(&state.pool).await?;
    Ok(Json(SiteFormPage {
        title: "Add New Site",
        cities: city_choices(),
        periods,
        figures,
        site: None,
        selected_periods: Vec::new(),
        selected_figures: Vec::new(),
    }))
}

/// POST /sites/create/
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    SubmittedForm(mut data): SubmittedForm,
) -> AppResult<Redirect> {
    let form = validate(&data)?;
    check_associations_exist(&state, &form).await?;
    let image = store_upload(&state, &mut data, SITE_IMAGE_DIR).await?;

    let input = CreateSite {
        name: form.name,
        city: form.city,
        built_year: form.built_year,
        description: form.description,
        image,
        created_by: Some(user.user_id),
        time_periods: form.time_periods,
        related_figures: form.related_figures,
    };
    let site = SiteRepo::create(&state.pool, &input).await?;

    tracing::info!(site_id = site.id, user_id = user.user_id, name = %site.name, "Historical site created");
    Ok(Redirect::to(&format!("/sites/{}/", site.id)))
}

/// GET /sites/{id}/edit/
pub async fn edit_form(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SiteFormPage>> {
    let site = find_site(&state, id).await?;
    let periods = PeriodRepo::list(&state.pool).await?;
    let figures = FigureRepo::list(&state.pool).await?;
    let selected_periods = PeriodRepo::list_by_site(&state.pool, id)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    let selected_figures = FigureRepo::list_by_site(&state.pool, id)
        .await?
        .into_iter()
        .map(|f| f.id)
        .collect();

    Ok(Json(SiteFormPage {
        title: "Edit Site",
        cities: city_choices(),
        periods,
        figures,
        site: Some(site),
        selected_periods,
        selected_figures,
    }))
}

/// POST /sites/{id}/edit/
///
/// Full-field replace, including both association sets; an edit without a
/// new upload keeps the stored image.
pub async fn edit(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    SubmittedForm(mut data): SubmittedForm,
) -> AppResult<Redirect> {
    let existing = find_site(&state, id).await?;
    let form = validate(&data)?;
    check_associations_exist(&state, &form).await?;
    let image = match store_upload(&state, &mut data, SITE_IMAGE_DIR).await? {
        Some(path) => Some(path),
        None => existing.image,
    };

    let input = CreateSite {
        name: form.name,
        city: form.city,
        built_year: form.built_year,
        description: form.description,
        image,
        created_by: existing.created_by,
        time_periods: form.time_periods,
        related_figures: form.related_figures,
    };
    SiteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Site", id }))?;

    tracing::info!(site_id = id, user_id = user.user_id, "Historical site updated");
    Ok(Redirect::to(&format!("/sites/{id}/")))
}

/// GET /sites/{id}/delete/
///
/// First phase of deletion: render the confirmation context.
pub async fn delete_confirm(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SiteDeletePage>> {
    let site = find_site(&state, id).await?;
    Ok(Json(SiteDeletePage { site }))
}

/// POST /sites/{id}/delete/
///
/// Second phase: execute. Referenced periods and figures are untouched.
pub async fn destroy(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    let deleted = SiteRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Site", id }));
    }

    tracing::info!(site_id = id, user_id = user.user_id, "Historical site deleted");
    Ok(Redirect::to("/sites/"))
}

/// Look up a site or fail with NotFound.
async fn find_site(state: &AppState, id: DbId) -> AppResult<HistoricalSite> {
    SiteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Site", id }))
}

/// Reject a validated form naming periods or figures that no longer exist.
async fn check_associations_exist(state: &AppState, form: &SiteForm) -> AppResult<()> {
    let mut errors = FormErrors::default();

    for period_id in &form.time_periods {
        if PeriodRepo::find_by_id(&state.pool, *period_id)
            .await?
            .is_none()
        {
            errors.add("time_periods", format!("'{period_id}' is not a valid choice."));
        }
    }
    for figure_id in &form.related_figures {
        if FigureRepo::find_by_id(&state.pool, *figure_id)
            .await?
            .is_none()
        {
            errors.add(
                "related_figures",
                format!("'{figure_id}' is not a valid choice."),
            );
        }
    }

    errors.into_result(())?;
    Ok(())
}
