//! Route definitions for the `/admin` resources.
//!
//! Every handler requires the `admin` role.

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /users                      -> list_users
/// DELETE /users/{id}                 -> delete_user
/// PATCH  /users/{id}/plan            -> update_user_plan
/// PATCH  /users/{id}/role            -> update_user_role
/// GET    /payment-methods            -> list_payment_methods
/// POST   /payment-methods            -> create_payment_method
/// PATCH  /payment-methods/{id}       -> update_payment_method
/// DELETE /payment-methods/{id}       -> delete_payment_method
/// GET    /ad-sources                 -> list_ad_sources
/// POST   /ad-sources                 -> create_ad_source
/// PATCH  /ad-sources/{id}            -> update_ad_source
/// DELETE /ad-sources/{id}            -> delete_ad_source
/// GET    /payment-receipts           -> list_all_receipts
/// PATCH  /payment-receipts/{id}      -> review_receipt
/// GET    /settings/{key}             -> get_setting
/// PUT    /settings/{key}             -> put_setting
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/users/{id}/plan", patch(admin::update_user_plan))
        .route("/users/{id}/role", patch(admin::update_user_role))
        .route(
            "/payment-methods",
            get(admin::list_payment_methods).post(admin::create_payment_method),
        )
        .route(
            "/payment-methods/{id}",
            patch(admin::update_payment_method).delete(admin::delete_payment_method),
        )
        .route(
            "/ad-sources",
            get(admin::list_ad_sources).post(admin::create_ad_source),
        )
        .route(
            "/ad-sources/{id}",
            patch(admin::update_ad_source).delete(admin::delete_ad_source),
        )
        .route("/payment-receipts", get(admin::list_all_receipts))
        .route("/payment-receipts/{id}", patch(admin::review_receipt))
        .route(
            "/settings/{key}",
            get(admin::get_setting).put(admin::put_setting),
        )
}
