//! The runner against the PostgreSQL store.

use std::sync::Arc;

use assert_matches::assert_matches;
use sqlx::PgPool;
use webtoapp_analysis::OfflineAnalyzer;
use webtoapp_core::analysis::AnalysisReport;
use webtoapp_db::models::app::CreateApp;
use webtoapp_db::models::status::AppStatus;
use webtoapp_db::models::user::CreateUser;
use webtoapp_db::repositories::{AppRepo, UserRepo};
use webtoapp_events::EventBus;
use webtoapp_pipeline::{AppStore, GenerationDelays, JobRunner, PgAppStore, StoreError};

async fn pending_app(pool: &PgPool, website_url: Option<&str>) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: "runner@test.com".to_string(),
            password_hash: "hash".to_string(),
            first_name: None,
            last_name: None,
        },
    )
    .await
    .unwrap();
    let app = AppRepo::create(
        pool,
        &CreateApp {
            user_id: user.id,
            name: "Runner".to_string(),
            website_url: website_url.map(str::to_string),
            platform: "android".to_string(),
            mode: "online".to_string(),
        },
    )
    .await
    .unwrap();
    app.id
}

fn runner(pool: PgPool) -> JobRunner {
    JobRunner::new(
        Arc::new(PgAppStore::new(pool)),
        Arc::new(OfflineAnalyzer),
        Arc::new(EventBus::default()),
        GenerationDelays::zero(),
    )
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_url_job_completes_in_database(pool: PgPool) {
    let id = pending_app(&pool, Some("https://db.example")).await;

    runner(pool.clone()).run(id).await;

    let app = AppRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_matches!(app.status(), Some(AppStatus::Completed));
    assert_eq!(app.analysis(), Some(AnalysisReport::fallback()));
    assert_eq!(app.download_url, Some(format!("/api/v1/apps/{id}/download")));
    assert!(app.file_size.is_some());
    assert!(app.completed_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_of_missing_row_is_not_found(pool: PgPool) {
    let store = PgAppStore::new(pool);
    let result = store
        .update(12_345, &webtoapp_db::models::app::AppUpdate::status(AppStatus::Failed))
        .await;
    assert_matches!(result, Err(StoreError::NotFound(12_345)));
    assert!(store.get(12_345).await.unwrap().is_none());
}
