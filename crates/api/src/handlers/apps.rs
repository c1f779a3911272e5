//! Handlers for the `/apps` resource.
//!
//! All endpoints require authentication via [`AuthUser`]. Users see only
//! their own apps; admins may read and delete any app.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use webtoapp_core::artifact::{package_filename, placeholder_package, PACKAGE_CONTENT_TYPE};
use webtoapp_core::error::CoreError;
use webtoapp_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use webtoapp_core::types::DbId;
use webtoapp_core::validation::{
    normalize_optional_url, validate_app_name, validate_mode, validate_platform,
    validate_website_url, MODE_ONLINE,
};
use webtoapp_db::models::app::{App, AppListQuery, CreateApp};
use webtoapp_db::models::status::AppStatus;
use webtoapp_db::repositories::{AppRepo, EventRepo};
use webtoapp_events::bus::{APP_CREATED, APP_DELETED, ENTITY_APP};
use webtoapp_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /apps`.
#[derive(Debug, Deserialize)]
pub struct CreateAppRequest {
    pub name: String,
    /// Absent or blank for uploaded projects.
    pub website_url: Option<String>,
    pub platform: String,
    /// Defaults to `online`.
    pub mode: Option<String>,
}

/// An app row plus its client-facing progress label.
#[derive(Debug, Serialize)]
pub struct AppView {
    #[serde(flatten)]
    pub app: App,
    pub stage: &'static str,
}

impl From<App> for AppView {
    fn from(app: App) -> Self {
        let stage = app.stage();
        Self { app, stage }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch an app by ID and verify the caller owns it (or is admin).
///
/// `action` is used in the error message (e.g. "view", "delete").
async fn find_and_authorize(
    pool: &sqlx::PgPool,
    app_id: DbId,
    auth: &AuthUser,
    action: &str,
) -> AppResult<App> {
    let app = AppRepo::find_by_id(pool, app_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "App",
            id: app_id,
        }))?;

    if app.user_id != auth.user_id && !auth.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Cannot {action} another user's app"
        ))));
    }

    Ok(app)
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/v1/apps
///
/// Insert a `pending` app and start its generation run in the background.
/// Returns 201 immediately; clients poll `GET /apps/{id}` for progress.
pub async fn create_app(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAppRequest>,
) -> AppResult<impl IntoResponse> {
    validate_app_name(&input.name)?;
    validate_platform(&input.platform)?;
    let mode = input.mode.unwrap_or_else(|| MODE_ONLINE.to_string());
    validate_mode(&mode)?;
    let website_url = normalize_optional_url(input.website_url);
    if let Some(url) = &website_url {
        validate_website_url(url)?;
    }

    let app = AppRepo::create(
        &state.pool,
        &CreateApp {
            user_id: auth.user_id,
            name: input.name.trim().to_string(),
            website_url,
            platform: input.platform,
            mode,
        },
    )
    .await?;

    state.event_bus.publish(
        PlatformEvent::for_app(APP_CREATED, app.id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({ "platform": app.platform })),
    );

    let expected = state.runner.delays().total(app.website_url().is_some());
    tracing::info!(
        app_id = app.id,
        user_id = auth.user_id,
        platform = %app.platform,
        expected_secs = expected.as_secs(),
        "App created, generation started",
    );
    // Fire and forget: the run reports through the app row and the event bus.
    drop(state.runner.spawn(app.id));

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AppView::from(app),
        }),
    ))
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// GET /api/v1/apps
///
/// The caller's apps, newest first. Supports `limit` and `offset`.
pub async fn list_apps(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AppListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let apps = AppRepo::list_by_user(&state.pool, auth.user_id, limit, offset).await?;
    let views: Vec<AppView> = apps.into_iter().map(AppView::from).collect();
    Ok(Json(DataResponse { data: views }))
}

/// GET /api/v1/apps/{id}
pub async fn get_app(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(app_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let app = find_and_authorize(&state.pool, app_id, &auth, "view").await?;
    Ok(Json(DataResponse {
        data: AppView::from(app),
    }))
}

/// GET /api/v1/apps/{id}/events
///
/// Persisted lifecycle events for the app, oldest first.
pub async fn list_app_events(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(app_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_and_authorize(&state.pool, app_id, &auth, "view").await?;
    let events = EventRepo::list_for_entity(&state.pool, ENTITY_APP, app_id).await?;
    Ok(Json(DataResponse { data: events }))
}

// ---------------------------------------------------------------------------
// Download
// ---------------------------------------------------------------------------

/// GET /api/v1/apps/{id}/download
///
/// Serve the placeholder package. Returns 400 until the app is `completed`.
pub async fn download_app(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(app_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let app = find_and_authorize(&state.pool, app_id, &auth, "download").await?;

    if app.status() != Some(AppStatus::Completed) || app.download_url.is_none() {
        return Err(AppError::Core(CoreError::NotReady(
            "App not ready for download".into(),
        )));
    }

    let generated_at = app.completed_at.unwrap_or_else(Utc::now).to_rfc3339();
    let body = placeholder_package(&app.name, &generated_at);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        package_filename(&app.name)
    );

    tracing::info!(app_id, user_id = auth.user_id, "App package downloaded");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, PACKAGE_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /api/v1/apps/{id}
///
/// Returns 204. A run still in flight for the app finds the row gone and
/// stops without writing.
pub async fn delete_app(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(app_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_and_authorize(&state.pool, app_id, &auth, "delete").await?;

    if !AppRepo::delete(&state.pool, app_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "App",
            id: app_id,
        }));
    }

    state
        .event_bus
        .publish(PlatformEvent::for_app(APP_DELETED, app_id).with_actor(auth.user_id));

    tracing::info!(app_id, user_id = auth.user_id, "App deleted");

    Ok(StatusCode::NO_CONTENT)
}
