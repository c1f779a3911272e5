//! Repository for the `ad_sources` table.

use sqlx::PgPool;
use webtoapp_core::types::DbId;

use crate::models::ad_source::{AdSource, CreateAdSource, UpdateAdSource};

const COLUMNS: &str = "id, name, source_type, network_app_id, placement_id, revenue_share, \
                       is_active, created_at, updated_at";

/// Provides CRUD operations for ad sources.
pub struct AdSourceRepo;

impl AdSourceRepo {
    /// List all ad sources, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AdSource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ad_sources ORDER BY created_at DESC");
        sqlx::query_as::<_, AdSource>(&query).fetch_all(pool).await
    }

    pub async fn create(pool: &PgPool, input: &CreateAdSource) -> Result<AdSource, sqlx::Error> {
        let query = format!(
            "INSERT INTO ad_sources \
                (name, source_type, network_app_id, placement_id, revenue_share, is_active) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdSource>(&query)
            .bind(&input.name)
            .bind(&input.source_type)
            .bind(&input.network_app_id)
            .bind(&input.placement_id)
            .bind(input.revenue_share)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Update an ad source. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdSource,
    ) -> Result<Option<AdSource>, sqlx::Error> {
        let query = format!(
            "UPDATE ad_sources SET \
                name = COALESCE($2, name), \
                source_type = COALESCE($3, source_type), \
                network_app_id = COALESCE($4, network_app_id), \
                placement_id = COALESCE($5, placement_id), \
                revenue_share = COALESCE($6, revenue_share), \
                is_active = COALESCE($7, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdSource>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.source_type)
            .bind(&input.network_app_id)
            .bind(&input.placement_id)
            .bind(input.revenue_share)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete an ad source. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ad_sources WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
