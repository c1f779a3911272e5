//! Route definitions for the user-facing `/payment-receipts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Routes mounted at `/payment-receipts`.
///
/// ```text
/// GET    /                -> list_my_receipts
/// POST   /                -> submit_receipt
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(payments::list_my_receipts).post(payments::submit_receipt),
    )
}
