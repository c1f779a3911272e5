//! HTTP-level tests for app conversion: create, poll, download, delete.
//!
//! The test app runs generation with zero delays and the offline analyzer,
//! so every run completes within a few polls.

mod common;

use std::time::Duration;

use axum::http::{header, StatusCode};
use common::{
    body_json, body_text, delete_auth, get_auth, post_json_auth, post_multipart_auth,
    wait_for_terminal,
};
use serde_json::json;
use sqlx::PgPool;
use webtoapp_core::analysis::AnalysisReport;
use webtoapp_core::artifact::{download_path, ARTIFACT_SIZE_RANGE, PACKAGE_CONTENT_TYPE};
use webtoapp_db::models::app::CreateApp;
use webtoapp_db::models::status::AppStatus;
use webtoapp_db::repositories::{AppRepo, EventRepo};
use webtoapp_events::bus::{
    APP_ANALYSIS_COMPLETED, APP_COMPLETED, APP_CREATED, APP_GENERATION_STARTED, ENTITY_APP,
};

async fn create_app(
    app: &common::TestApp,
    token: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = post_json_auth(&app.router, "/api/v1/apps", body, token).await;
    let status = response.status();
    (status, body_json(response).await)
}

/// Insert a `pending` app without starting a run.
async fn insert_pending(pool: &PgPool, user_id: i64) -> i64 {
    AppRepo::create(
        pool,
        &CreateApp {
            user_id,
            name: "Idle".into(),
            website_url: None,
            platform: "android".into(),
            mode: "online".into(),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Create and run
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn url_conversion_completes_with_analysis(pool: PgPool) {
    let (user, token) = common::create_user(&pool, "u@example.com", "user").await;
    let app = common::build_test_app(pool.clone());

    let (status, json) = create_app(
        &app,
        &token,
        json!({ "name": "Shop", "website_url": "https://shop.example.com", "platform": "android" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["stage"], "pending");
    assert_eq!(json["data"]["mode"], "online");
    assert_eq!(json["data"]["user_id"], user.id);

    let id = json["data"]["id"].as_i64().unwrap();
    let done = wait_for_terminal(&pool, id).await;

    assert_eq!(done.status(), Some(AppStatus::Completed));
    assert_eq!(done.download_url.as_deref(), Some(download_path(id).as_str()));
    assert!(ARTIFACT_SIZE_RANGE.contains(&done.file_size.unwrap()));
    assert!(done.completed_at.is_some());
    assert_eq!(done.analysis(), Some(AnalysisReport::fallback()));

    let fetched = get_auth(&app.router, &format!("/api/v1/apps/{id}"), &token).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let json = body_json(fetched).await;
    assert_eq!(json["data"]["stage"], "completed");
    assert_eq!(json["data"]["ai_analysis"]["contentType"], "Website");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_conversion_completes_without_analysis(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "u@example.com", "user").await;
    let app = common::build_test_app(pool.clone());

    let (status, json) = create_app(
        &app,
        &token,
        json!({ "name": "Docs", "website_url": "   ", "platform": "ios", "mode": "offline" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(json["data"]["website_url"].is_null());

    let done = wait_for_terminal(&pool, json["data"]["id"].as_i64().unwrap()).await;
    assert_eq!(done.status(), Some(AppStatus::Completed));
    assert!(done.ai_analysis.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_validates_input(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "u@example.com", "user").await;
    let app = common::build_test_app(pool.clone());

    for body in [
        json!({ "name": "  ", "platform": "android" }),
        json!({ "name": "Shop", "platform": "symbian" }),
        json!({ "name": "Shop", "platform": "android", "mode": "hybrid" }),
        json!({ "name": "Shop", "platform": "android", "website_url": "ftp://x.io" }),
    ] {
        let (status, json) = create_app(&app, &token, body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body} should be rejected");
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    let (_, me) = common::create_user(&pool, "other@example.com", "user").await;
    let list = get_auth(&app.router, "/api/v1/apps", &me).await;
    assert_eq!(body_json(list).await["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lifecycle_events_are_persisted_in_order(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "u@example.com", "user").await;
    let app = common::build_test_app(pool.clone());

    let (_, json) = create_app(
        &app,
        &token,
        json!({ "name": "Shop", "website_url": "https://shop.example.com", "platform": "android" }),
    )
    .await;
    let id = json["data"]["id"].as_i64().unwrap();
    wait_for_terminal(&pool, id).await;

    // Persistence runs on its own task; give it a moment to catch up.
    let mut types = Vec::new();
    for _ in 0..100 {
        let events = EventRepo::list_for_entity(&pool, ENTITY_APP, id).await.unwrap();
        types = events.into_iter().map(|e| e.event_type).collect::<Vec<_>>();
        if types.len() >= 4 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(
        types,
        vec![
            APP_CREATED.to_string(),
            APP_GENERATION_STARTED.to_string(),
            APP_ANALYSIS_COMPLETED.to_string(),
            APP_COMPLETED.to_string(),
        ]
    );

    let response = get_auth(&app.router, &format!("/api/v1/apps/{id}/events"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 4);
}

// ---------------------------------------------------------------------------
// Read / ownership
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn apps_are_owner_scoped(pool: PgPool) {
    let (owner, owner_token) = common::create_user(&pool, "owner@example.com", "user").await;
    let (_, other_token) = common::create_user(&pool, "other@example.com", "user").await;
    let (_, admin_token) = common::create_user(&pool, "admin@example.com", "admin").await;
    let id = insert_pending(&pool, owner.id).await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/apps/{id}");

    assert_eq!(get_auth(&app.router, &uri, &owner_token).await.status(), StatusCode::OK);
    assert_eq!(get_auth(&app.router, &uri, &other_token).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(get_auth(&app.router, &uri, &admin_token).await.status(), StatusCode::OK);

    let mine = body_json(get_auth(&app.router, "/api/v1/apps", &owner_token).await).await;
    assert_eq!(mine["data"][0]["id"], id);
    let theirs = body_json(get_auth(&app.router, "/api/v1/apps", &other_token).await).await;
    assert!(theirs["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_app_returns_404(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "u@example.com", "user").await;
    let app = common::build_test_app(pool);

    let response = get_auth(&app.router, "/api/v1/apps/999999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Download
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn download_requires_completed_app(pool: PgPool) {
    let (user, token) = common::create_user(&pool, "u@example.com", "user").await;
    let id = insert_pending(&pool, user.id).await;
    let app = common::build_test_app(pool);

    let response = get_auth(&app.router, &format!("/api/v1/apps/{id}/download"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "NOT_READY");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_app_downloads_placeholder_package(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "u@example.com", "user").await;
    let app = common::build_test_app(pool.clone());

    let (_, json) = create_app(
        &app,
        &token,
        json!({ "name": "My Shop", "platform": "android" }),
    )
    .await;
    let id = json["data"]["id"].as_i64().unwrap();
    wait_for_terminal(&pool, id).await;

    let response = get_auth(&app.router, &download_path(id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        PACKAGE_CONTENT_TYPE
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap(),
        "attachment; filename=\"My Shop.apk\""
    );
    assert!(body_text(response).await.starts_with("Mock APK for My Shop"));
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_app(pool: PgPool) {
    let (user, token) = common::create_user(&pool, "u@example.com", "user").await;
    let (_, other_token) = common::create_user(&pool, "other@example.com", "user").await;
    let id = insert_pending(&pool, user.id).await;
    let app = common::build_test_app(pool.clone());
    let uri = format!("/api/v1/apps/{id}");

    assert_eq!(delete_auth(&app.router, &uri, &other_token).await.status(), StatusCode::FORBIDDEN);
    assert_eq!(delete_auth(&app.router, &uri, &token).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(get_auth(&app.router, &uri, &token).await.status(), StatusCode::NOT_FOUND);
    assert!(AppRepo::find_by_id(&pool, id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Analysis endpoints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn analyze_website_returns_report(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "u@example.com", "user").await;
    let app = common::build_test_app(pool);

    let empty = post_json_auth(&app.router, "/api/v1/analyze-website", json!({ "url": " " }), &token).await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        &app.router,
        "/api/v1/analyze-website",
        json!({ "url": "https://example.com" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["compatible"], true);
    assert_eq!(json["data"]["recommendations"].as_array().unwrap().len(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_project_accepts_only_zip(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "u@example.com", "user").await;
    let app = common::build_test_app(pool);

    let accepted = post_multipart_auth(
        &app.router,
        "/api/v1/upload-project",
        "project",
        "site.zip",
        "application/zip",
        b"PK\x03\x04fake",
        &token,
    )
    .await;
    assert_eq!(accepted.status(), StatusCode::OK);
    assert_eq!(body_json(accepted).await["data"]["contentType"], "Website Project");

    let rejected = post_multipart_auth(
        &app.router,
        "/api/v1/upload-project",
        "project",
        "site.tar.gz",
        "application/gzip",
        b"not a zip",
        &token,
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let wrong_field = post_multipart_auth(
        &app.router,
        "/api/v1/upload-project",
        "file",
        "site.zip",
        "application/zip",
        b"PK",
        &token,
    )
    .await;
    assert_eq!(wrong_field.status(), StatusCode::BAD_REQUEST);
}
