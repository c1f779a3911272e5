//! Admin key/value setting model.

use serde::Serialize;
use sqlx::FromRow;
use webtoapp_core::types::{DbId, Timestamp};

/// A row from the `admin_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminSetting {
    pub id: DbId,
    pub key: String,
    pub value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
