//! Route definitions for the `/apps` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::apps;
use crate::state::AppState;

/// Routes mounted at `/apps`.
///
/// ```text
/// GET    /                -> list_apps
/// POST   /                -> create_app
/// GET    /{id}            -> get_app
/// DELETE /{id}            -> delete_app
/// GET    /{id}/download   -> download_app
/// GET    /{id}/events     -> list_app_events
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(apps::list_apps).post(apps::create_app))
        .route("/{id}", get(apps::get_app).delete(apps::delete_app))
        .route("/{id}/download", get(apps::download_app))
        .route("/{id}/events", get(apps::list_app_events))
}
