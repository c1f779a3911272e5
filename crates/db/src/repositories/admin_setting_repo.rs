//! Repository for the `admin_settings` key/value table.

use sqlx::PgPool;

use crate::models::admin_setting::AdminSetting;

const COLUMNS: &str = "id, key, value, created_at, updated_at";

/// Provides get/upsert for admin settings.
pub struct AdminSettingRepo;

impl AdminSettingRepo {
    pub async fn get(pool: &PgPool, key: &str) -> Result<Option<AdminSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_settings WHERE key = $1");
        sqlx::query_as::<_, AdminSetting>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert the setting or overwrite its value if the key already exists.
    pub async fn upsert(pool: &PgPool, key: &str, value: &str) -> Result<AdminSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_settings (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminSetting>(&query)
            .bind(key)
            .bind(value)
            .fetch_one(pool)
            .await
    }
}
