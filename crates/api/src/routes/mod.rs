pub mod admin;
pub mod apps;
pub mod auth;
pub mod health;
pub mod payments;

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use webtoapp_core::validation::MAX_UPLOAD_BYTES;

use crate::handlers;
use crate::state::AppState;

/// Headroom above the archive limit for multipart boundaries and headers.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                           register (public)
/// /auth/verify-email                       verify email (public)
/// /auth/login                              login (public)
/// /auth/user                               current user
///
/// /apps                                    list, create
/// /apps/{id}                               get, delete
/// /apps/{id}/download                      placeholder package
/// /apps/{id}/events                        lifecycle events
///
/// /analyze-website                         analyze a URL (POST)
/// /upload-project                          upload a zipped project (POST)
///
/// /payment-receipts                        list own, submit
///
/// /admin/users                             list (admin only)
/// /admin/users/{id}                        delete
/// /admin/users/{id}/plan                   change plan (PATCH)
/// /admin/users/{id}/role                   change role (PATCH)
/// /admin/payment-methods                   list, create
/// /admin/payment-methods/{id}              update, delete
/// /admin/ad-sources                        list, create
/// /admin/ad-sources/{id}                   update, delete
/// /admin/payment-receipts                  list all
/// /admin/payment-receipts/{id}             review (PATCH)
/// /admin/settings/{key}                    get, put
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/apps", apps::router())
        .route(
            "/analyze-website",
            post(handlers::analysis::analyze_website),
        )
        .route(
            "/upload-project",
            post(handlers::analysis::upload_project)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .nest("/payment-receipts", payments::router())
        .nest("/admin", admin::router())
}
