//! Handler for the home page.

use axum::extract::State;
use axum::Json;
use meros_db::models::figure::HistoricalFigure;
use meros_db::models::site::HistoricalSite;
use meros_db::repositories::{FigureRepo, PeriodRepo, SiteRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// How many recently added figures the home page shows.
const RECENT_FIGURES: i64 = 3;

/// How many featured sites the home page shows.
const FEATURED_SITES: i64 = 3;

/// Context for the home page: catalogue totals plus a small showcase.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub periods_count: i64,
    pub figures_count: i64,
    pub sites_count: i64,
    pub recent_figures: Vec<HistoricalFigure>,
    pub featured_sites: Vec<HistoricalSite>,
}

/// GET /
pub async fn home(State(state): State<AppState>) -> AppResult<Json<HomePage>> {
    let periods_count = PeriodRepo::count(&state.pool).await?;
    let figures_count = FigureRepo::count(&state.pool).await?;
    let sites_count = SiteRepo::count(&state.pool).await?;

    let recent_figures = FigureRepo::recent(&state.pool, RECENT_FIGURES).await?;
    let featured_sites = SiteRepo::featured(&state.pool, FEATURED_SITES).await?;

    Ok(Json(HomePage {
        periods_count,
        figures_count,
        sites_count,
        recent_figures,
        featured_sites,
    }))
}
