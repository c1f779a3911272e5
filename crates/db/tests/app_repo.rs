//! Integration tests for the `apps` repository.
//!
//! Covers creation in `pending`, partial updates that leave untouched
//! columns alone, owner-scoped listing, and cascade on user delete.

use assert_matches::assert_matches;
use sqlx::PgPool;
use webtoapp_db::models::app::{AppUpdate, CreateApp};
use webtoapp_db::models::status::AppStatus;
use webtoapp_db::models::user::CreateUser;
use webtoapp_db::repositories::{AppRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str) -> i64 {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        first_name: None,
        last_name: None,
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

fn new_app(user_id: i64, name: &str, url: Option<&str>) -> CreateApp {
    CreateApp {
        user_id,
        name: name.to_string(),
        website_url: url.map(str::to_string),
        platform: "android".to_string(),
        mode: "online".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_starts_pending_with_no_artifact(pool: PgPool) {
    let user_id = new_user(&pool, "a@test.com").await;
    let app = AppRepo::create(&pool, &new_app(user_id, "Shop", Some("https://shop.io")))
        .await
        .unwrap();

    assert_matches!(app.status(), Some(AppStatus::Pending));
    assert_eq!(app.website_url(), Some("https://shop.io"));
    assert!(app.ai_analysis.is_none());
    assert!(app.download_url.is_none());
    assert!(app.file_size.is_none());
    assert!(app.completed_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_keeps_other_columns(pool: PgPool) {
    let user_id = new_user(&pool, "b@test.com").await;
    let app = AppRepo::create(&pool, &new_app(user_id, "Blog", Some("https://blog.io")))
        .await
        .unwrap();

    AppRepo::update(&pool, app.id, &AppUpdate::status(AppStatus::Generating))
        .await
        .unwrap()
        .unwrap();
    let analysed = AppRepo::update(
        &pool,
        app.id,
        &AppUpdate::analysis(serde_json::json!({ "compatible": true })),
    )
    .await
    .unwrap()
    .unwrap();

    assert_matches!(analysed.status(), Some(AppStatus::Generating));
    assert_eq!(analysed.ai_analysis, Some(serde_json::json!({ "compatible": true })));
    assert!(analysed.download_url.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completed_update_writes_artifact_fields_together(pool: PgPool) {
    let user_id = new_user(&pool, "c@test.com").await;
    let app = AppRepo::create(&pool, &new_app(user_id, "Folio", None))
        .await
        .unwrap();

    let now = chrono::Utc::now();
    let done = AppRepo::update(
        &pool,
        app.id,
        &AppUpdate::completed(format!("/api/v1/apps/{}/download", app.id), 4_200_000, now),
    )
    .await
    .unwrap()
    .unwrap();

    assert_matches!(done.status(), Some(AppStatus::Completed));
    assert_eq!(done.file_size, Some(4_200_000));
    assert!(done.download_url.is_some());
    assert!(done.completed_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_row_returns_none(pool: PgPool) {
    let result = AppRepo::update(&pool, 9_999, &AppUpdate::status(AppStatus::Failed))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_user_is_owner_scoped_and_newest_first(pool: PgPool) {
    let alice = new_user(&pool, "alice@test.com").await;
    let bob = new_user(&pool, "bob@test.com").await;

    let first = AppRepo::create(&pool, &new_app(alice, "One", None)).await.unwrap();
    let second = AppRepo::create(&pool, &new_app(alice, "Two", None)).await.unwrap();
    AppRepo::create(&pool, &new_app(bob, "Other", None)).await.unwrap();

    let apps = AppRepo::list_by_user(&pool, alice, 50, 0).await.unwrap();
    let ids: Vec<i64> = apps.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let page = AppRepo::list_by_user(&pool, alice, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_platform_is_rejected_by_check(pool: PgPool) {
    let user_id = new_user(&pool, "d@test.com").await;
    let mut input = new_app(user_id, "Bad", None);
    input.platform = "symbian".to_string();

    let err = AppRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(_));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_user_cascades_to_apps(pool: PgPool) {
    let user_id = new_user(&pool, "e@test.com").await;
    let app = AppRepo::create(&pool, &new_app(user_id, "Gone", None)).await.unwrap();

    assert!(UserRepo::delete(&pool, user_id).await.unwrap());
    assert!(AppRepo::find_by_id(&pool, app.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_app(pool: PgPool) {
    let user_id = new_user(&pool, "f@test.com").await;
    let app = AppRepo::create(&pool, &new_app(user_id, "Temp", None)).await.unwrap();

    assert!(AppRepo::delete(&pool, app.id).await.unwrap());
    assert!(!AppRepo::delete(&pool, app.id).await.unwrap());
}
