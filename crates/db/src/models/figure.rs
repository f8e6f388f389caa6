//! Historical-figure entity model and DTO.

use meros_core::catalog::FigureRole;
use meros_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `historical_figures` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoricalFigure {
    pub id: DbId,
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub biography: String,
    pub role: FigureRole,
    /// The owning period; cascade-deleted with it.
    pub time_period_id: DbId,
    pub image: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// Payload for inserting or fully replacing a figure.
#[derive(Debug, Clone)]
pub struct CreateFigure {
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
    pub biography: String,
    pub role: FigureRole,
    pub time_period_id: DbId,
    pub image: Option<String>,
    pub created_by: Option<DbId>,
}
