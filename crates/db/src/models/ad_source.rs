//! Ad source entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use webtoapp_core::types::{DbId, Timestamp};

/// A row from the `ad_sources` table (an ad network wired into generated apps).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdSource {
    pub id: DbId,
    pub name: String,
    /// Network kind, e.g. `admob` or `facebook`.
    pub source_type: String,
    /// The app identifier issued by the ad network.
    pub network_app_id: Option<String>,
    pub placement_id: Option<String>,
    /// Percentage in `[0, 100]`.
    pub revenue_share: f32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an ad source.
#[derive(Debug, Deserialize)]
pub struct CreateAdSource {
    pub name: String,
    pub source_type: String,
    pub network_app_id: Option<String>,
    pub placement_id: Option<String>,
    pub revenue_share: f32,
    pub is_active: Option<bool>,
}

/// DTO for updating an ad source. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAdSource {
    pub name: Option<String>,
    pub source_type: Option<String>,
    pub network_app_id: Option<String>,
    pub placement_id: Option<String>,
    pub revenue_share: Option<f32>,
    pub is_active: Option<bool>,
}
