//! Repository for the `historical_sites` table and its association tables.

use meros_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::site::{CreateSite, HistoricalSite};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, city, built_year, description, image, created_by, created_at";

/// The same columns qualified with the `s` alias, for joined queries.
const S_COLUMNS: &str =
    "s.id, s.name, s.city, s.built_year, s.description, s.image, s.created_by, s.created_at";

/// Provides CRUD operations for historical sites, including the non-owning
/// period and figure associations.
pub struct SiteRepo;

impl SiteRepo {
    /// Insert a new site and its association rows in one transaction,
    /// returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSite) -> Result<HistoricalSite, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO historical_sites (name, city, built_year, description, image, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let site = sqlx::query_as::<_, HistoricalSite>(&query)
            .bind(&input.name)
            .bind(input.city)
            .bind(input.built_year)
            .bind(&input.description)
            .bind(&input.image)
            .bind(input.created_by)
            .fetch_one(&mut *tx)
            .await?;

        Self::replace_associations(&mut tx, site.id, input).await?;

        tx.commit().await?;
        Ok(site)
    }

    /// Find a site by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<HistoricalSite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM historical_sites WHERE id = $1");
        sqlx::query_as::<_, HistoricalSite>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all sites in the default order (name ascending).
    pub async fn list(pool: &PgPool) -> Result<Vec<HistoricalSite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM historical_sites ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, HistoricalSite>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the sites associated with a period, in the default order.
    pub async fn list_by_period(
        pool: &PgPool,
        period_id: DbId,
    ) -> Result<Vec<HistoricalSite>, sqlx::Error> {
        let query = format!(
            "SELECT {S_COLUMNS}
             FROM historical_sites s
             JOIN site_periods sp ON sp.site_id = s.id
             WHERE sp.period_id = $1
             ORDER BY s.name ASC, s.id ASC"
        );
        sqlx::query_as::<_, HistoricalSite>(&query)
            .bind(period_id)
            .fetch_all(pool)
            .await
    }

    /// List the sites associated with a figure, in the default order.
    pub async fn list_by_figure(
        pool: &PgPool,
        figure_id: DbId,
    ) -> Result<Vec<HistoricalSite>, sqlx::Error> {
        let query = format!(
            "SELECT {S_COLUMNS}
             FROM historical_sites s
             JOIN site_figures sf ON sf.site_id = s.id
             WHERE sf.figure_id = $1
             ORDER BY s.name ASC, s.id ASC"
        );
        sqlx::query_as::<_, HistoricalSite>(&query)
            .bind(figure_id)
            .fetch_all(pool)
            .await
    }

    /// List the sites authored by a user, in the default order.
    pub async fn list_by_creator(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<HistoricalSite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM historical_sites
             WHERE created_by = $1
             ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, HistoricalSite>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The first sites in default order, for the home-page showcase.
    pub async fn featured(pool: &PgPool, limit: i64) -> Result<Vec<HistoricalSite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM historical_sites
             ORDER BY name ASC, id ASC
             LIMIT $1"
        );
        sqlx::query_as::<_, HistoricalSite>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Fully replace a site's fields and both association sets in one
    /// transaction. The creator and timestamp are never touched by edits.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateSite,
    ) -> Result<Option<HistoricalSite>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE historical_sites SET
                name = $2,
                city = $3,
                built_year = $4,
                description = $5,
                image = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let site = sqlx::query_as::<_, HistoricalSite>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.city)
            .bind(input.built_year)
            .bind(&input.description)
            .bind(&input.image)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(site) = site else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("DELETE FROM site_periods WHERE site_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM site_figures WHERE site_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::replace_associations(&mut tx, id, input).await?;

        tx.commit().await?;
        Ok(Some(site))
    }

    /// Delete a site. Only its join rows cascade; periods and figures remain.
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM historical_sites WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of sites.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM historical_sites")
            .fetch_one(pool)
            .await
    }

    /// Insert the association rows for `input` against `site_id`.
    ///
    /// Fails with a foreign-key violation if a referenced period or figure
    /// does not exist; callers are expected to have validated the ids.
    async fn replace_associations(
        tx: &mut Transaction<'_, Postgres>,
        site_id: DbId,
        input: &CreateSite,
    ) -> Result<(), sqlx::Error> {
        for period_id in &input.time_periods {
            sqlx::query(
                "INSERT INTO site_periods (site_id, period_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(site_id)
            .bind(period_id)
            .execute(&mut **tx)
            .await?;
        }
        for figure_id in &input.related_figures {
            sqlx::query(
                "INSERT INTO site_figures (site_id, figure_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(site_id)
            .bind(figure_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
