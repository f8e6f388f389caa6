//! Repository for the `historical_figures` table.

use meros_core::types::DbId;
use sqlx::PgPool;

use crate::models::figure::{CreateFigure, HistoricalFigure};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, birth_year, death_year, biography, role, time_period_id, \
                       image, created_by, created_at";

/// The same columns qualified with the `f` alias, for joined queries.
const F_COLUMNS: &str = "f.id, f.name, f.birth_year, f.death_year, f.biography, f.role, \
                         f.time_period_id, f.image, f.created_by, f.created_at";

/// Provides CRUD operations for historical figures.
pub struct FigureRepo;

impl FigureRepo {
    /// Insert a new figure, returning the created row.
    ///
    /// Fails with a foreign-key violation if the referenced period does not
    /// exist; callers are expected to have validated it.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFigure,
    ) -> Result<HistoricalFigure, sqlx::Error> {
        let query = format!(
            "INSERT INTO historical_figures
                 (name, birth_year, death_year, biography, role, time_period_id, image, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoricalFigure>(&query)
            .bind(&input.name)
            .bind(input.birth_year)
            .bind(input.death_year)
            .bind(&input.biography)
            .bind(input.role)
            .bind(input.time_period_id)
            .bind(&input.image)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a figure by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<HistoricalFigure>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM historical_figures WHERE id = $1");
        sqlx::query_as::<_, HistoricalFigure>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all figures in the default order (birth year ascending, with
    /// unknown birth years last).
    pub async fn list(pool: &PgPool) -> Result<Vec<HistoricalFigure>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM historical_figures
             ORDER BY birth_year ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, HistoricalFigure>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the figures belonging to a period, in the default order.
    pub async fn list_by_period(
        pool: &PgPool,
        period_id: DbId,
    ) -> Result<Vec<HistoricalFigure>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM historical_figures
             WHERE time_period_id = $1
             ORDER BY birth_year ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, HistoricalFigure>(&query)
            .bind(period_id)
            .fetch_all(pool)
            .await
    }

    /// List the figures associated with a site, in the default order.
    pub async fn list_by_site(
        pool: &PgPool,
        site_id: DbId,
    ) -> Result<Vec<HistoricalFigure>, sqlx::Error> {
        let query = format!(
            "SELECT {F_COLUMNS}
             FROM historical_figures f
             JOIN site_figures sf ON sf.figure_id = f.id
             WHERE sf.site_id = $1
             ORDER BY f.birth_year ASC NULLS LAST, f.id ASC"
        );
        sqlx::query_as::<_, HistoricalFigure>(&query)
            .bind(site_id)
            .fetch_all(pool)
            .await
    }

    /// List the figures authored by a user, in the default order.
    pub async fn list_by_creator(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<HistoricalFigure>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM historical_figures
             WHERE created_by = $1
             ORDER BY birth_year ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, HistoricalFigure>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The most recently added figures, newest first.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<HistoricalFigure>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM historical_figures
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, HistoricalFigure>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Fully replace a figure's fields. The creator and timestamp are never
    /// touched by edits.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateFigure,
    ) -> Result<Option<HistoricalFigure>, sqlx::Error> {
        let query = format!(
            "UPDATE historical_figures SET
                name = $2,
                birth_year = $3,
                death_year = $4,
                biography = $5,
                role = $6,
                time_period_id = $7,
                image = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoricalFigure>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.birth_year)
            .bind(input.death_year)
            .bind(&input.biography)
            .bind(input.role)
            .bind(input.time_period_id)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }

    /// Delete a figure. Site associations cascade away with it; the sites
    /// themselves are untouched. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM historical_figures WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of figures.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM historical_figures")
            .fetch_one(pool)
            .await
    }
}
