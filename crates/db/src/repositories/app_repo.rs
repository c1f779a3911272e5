//! Repository for the `apps` table.
//!
//! Status transitions use the `AppStatus` enum from `models::status`.
//! Every write is a single statement keyed by id, so concurrent generation
//! runs never interleave a read-modify-write.

use sqlx::PgPool;
use webtoapp_core::types::DbId;

use crate::models::app::{App, AppUpdate, CreateApp};
use crate::models::status::AppStatus;

/// Column list for `apps` queries.
const COLUMNS: &str = "\
    id, user_id, name, website_url, platform, mode, status_id, \
    ai_analysis, download_url, file_size, created_at, completed_at";

/// Provides CRUD operations for app conversions.
pub struct AppRepo;

impl AppRepo {
    /// Insert a new app in `pending` status.
    pub async fn create(pool: &PgPool, input: &CreateApp) -> Result<App, sqlx::Error> {
        let query = format!(
            "INSERT INTO apps (user_id, name, website_url, platform, mode, status_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, App>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.website_url)
            .bind(&input.platform)
            .bind(&input.mode)
            .bind(AppStatus::Pending.id())
            .fetch_one(pool)
            .await
    }

    /// Find an app by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<App>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM apps WHERE id = $1");
        sqlx::query_as::<_, App>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's apps, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<App>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM apps WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, App>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. Only `Some` fields in `update` are written.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &AppUpdate,
    ) -> Result<Option<App>, sqlx::Error> {
        let query = format!(
            "UPDATE apps SET \
                status_id = COALESCE($2, status_id), \
                ai_analysis = COALESCE($3, ai_analysis), \
                download_url = COALESCE($4, download_url), \
                file_size = COALESCE($5, file_size), \
                completed_at = COALESCE($6, completed_at) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, App>(&query)
            .bind(id)
            .bind(update.status.map(AppStatus::id))
            .bind(&update.ai_analysis)
            .bind(&update.download_url)
            .bind(update.file_size)
            .bind(update.completed_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete an app. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM apps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
