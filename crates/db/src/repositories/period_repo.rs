//! Repository for the `time_periods` table.

use meros_core::types::DbId;
use sqlx::PgPool;

use crate::models::time_period::{CreateTimePeriod, TimePeriod};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, start_year, end_year, description, image, created_by, created_at";

/// The same columns qualified with the `p` alias, for joined queries.
const P_COLUMNS: &str = "p.id, p.name, p.start_year, p.end_year, p.description, p.image, \
                         p.created_by, p.created_at";

/// Provides CRUD operations for time periods.
pub struct PeriodRepo;

impl PeriodRepo {
    /// Insert a new period, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTimePeriod) -> Result<TimePeriod, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_periods (name, start_year, end_year, description, image, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimePeriod>(&query)
            .bind(&input.name)
            .bind(input.start_year)
            .bind(input.end_year)
            .bind(&input.description)
            .bind(&input.image)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a period by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimePeriod>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_periods WHERE id = $1");
        sqlx::query_as::<_, TimePeriod>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all periods in the default order (start year ascending).
    pub async fn list(pool: &PgPool) -> Result<Vec<TimePeriod>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_periods ORDER BY start_year ASC, id ASC");
        sqlx::query_as::<_, TimePeriod>(&query).fetch_all(pool).await
    }

    /// List the periods associated with a site, in the default order.
    pub async fn list_by_site(pool: &PgPool, site_id: DbId) -> Result<Vec<TimePeriod>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}
             FROM time_periods p
             JOIN site_periods sp ON sp.period_id = p.id
             WHERE sp.site_id = $1
             ORDER BY p.start_year ASC, p.id ASC"
        );
        sqlx::query_as::<_, TimePeriod>(&query)
            .bind(site_id)
            .fetch_all(pool)
            .await
    }

    /// List the periods authored by a user, in the default order.
    pub async fn list_by_creator(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TimePeriod>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_periods
             WHERE created_by = $1
             ORDER BY start_year ASC, id ASC"
        );
        sqlx::query_as::<_, TimePeriod>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Fully replace a period's fields. The creator and timestamp are never
    /// touched by edits.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateTimePeriod,
    ) -> Result<Option<TimePeriod>, sqlx::Error> {
        let query = format!(
            "UPDATE time_periods SET
                name = $2,
                start_year = $3,
                end_year = $4,
                description = $5,
                image = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimePeriod>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.start_year)
            .bind(input.end_year)
            .bind(&input.description)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a period. The database cascades the delete to its figures and
    /// to any site associations. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM time_periods WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of periods.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM time_periods")
            .fetch_one(pool)
            .await
    }
}
