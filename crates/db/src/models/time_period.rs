//! Time-period entity model and DTO.

use meros_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `time_periods` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimePeriod {
    pub id: DbId,
    pub name: String,
    pub start_year: i32,
    /// `None` means the period is ongoing.
    pub end_year: Option<i32>,
    pub description: String,
    /// Media-root-relative image path.
    pub image: Option<String>,
    /// NULL once the authoring account has been removed.
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// Payload for inserting or fully replacing a time period.
#[derive(Debug, Clone)]
pub struct CreateTimePeriod {
    pub name: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub description: String,
    pub image: Option<String>,
    pub created_by: Option<DbId>,
}
