//! Record store seam for the generation runner.

use async_trait::async_trait;
use sqlx::PgPool;
use webtoapp_core::types::DbId;
use webtoapp_db::models::app::{App, AppUpdate};
use webtoapp_db::repositories::AppRepo;

/// Errors from an [`AppStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No app with this id exists.
    #[error("App {0} not found")]
    NotFound(DbId),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other backend failure.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence of app records as seen by the runner.
///
/// `update` must apply the whole [`AppUpdate`] atomically, keyed by id,
/// without reading the row first.
#[async_trait]
pub trait AppStore: Send + Sync {
    async fn get(&self, id: DbId) -> Result<Option<App>, StoreError>;

    /// Apply `update` and return the row as written.
    async fn update(&self, id: DbId, update: &AppUpdate) -> Result<App, StoreError>;
}

/// PostgreSQL-backed [`AppStore`].
pub struct PgAppStore {
    pool: PgPool,
}

impl PgAppStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppStore for PgAppStore {
    async fn get(&self, id: DbId) -> Result<Option<App>, StoreError> {
        Ok(AppRepo::find_by_id(&self.pool, id).await?)
    }

    async fn update(&self, id: DbId, update: &AppUpdate) -> Result<App, StoreError> {
        AppRepo::update(&self.pool, id, update)
            .await?
            .ok_or(StoreError::NotFound(id))
    }
}
