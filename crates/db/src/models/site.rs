//! Historical-site entity model and DTO.

use meros_core::catalog::City;
use meros_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `historical_sites` table.
///
/// Period and figure associations live in the `site_periods` / `site_figures`
/// join tables and are resolved through the repository.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoricalSite {
    pub id: DbId,
    pub name: String,
    pub city: City,
    pub built_year: Option<i32>,
    pub description: String,
    pub image: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// Payload for inserting or fully replacing a site, including the complete
/// association sets (replace-set semantics).
#[derive(Debug, Clone)]
pub struct CreateSite {
    pub name: String,
    pub city: City,
    pub built_year: Option<i32>,
    pub description: String,
    pub image: Option<String>,
    pub created_by: Option<DbId>,
    pub time_periods: Vec<DbId>,
    pub related_figures: Vec<DbId>,
}
