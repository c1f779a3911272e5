//! Handlers for the user-facing `/payment-receipts` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use webtoapp_core::validation::{validate_amount, validate_required};
use webtoapp_db::models::payment_receipt::{CreatePaymentReceipt, PaymentReceipt};
use webtoapp_db::repositories::{PaymentMethodRepo, PaymentReceiptRepo};
use webtoapp_events::bus::{ENTITY_PAYMENT_RECEIPT, RECEIPT_SUBMITTED};
use webtoapp_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A receipt row plus its status name.
#[derive(Debug, Serialize)]
pub struct ReceiptView {
    #[serde(flatten)]
    pub receipt: PaymentReceipt,
    pub status: &'static str,
}

impl From<PaymentReceipt> for ReceiptView {
    fn from(receipt: PaymentReceipt) -> Self {
        let status = receipt.status().map_or("unknown", |s| s.name());
        Self { receipt, status }
    }
}

/// GET /api/v1/payment-receipts
///
/// The caller's receipts, newest first.
pub async fn list_my_receipts(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let receipts = PaymentReceiptRepo::list_by_user(&state.pool, auth.user_id).await?;
    let views: Vec<ReceiptView> = receipts.into_iter().map(ReceiptView::from).collect();
    Ok(Json(DataResponse { data: views }))
}

/// POST /api/v1/payment-receipts
///
/// Submit proof of a payment for admin review. The referenced payment
/// method must exist and be active.
pub async fn submit_receipt(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePaymentReceipt>,
) -> AppResult<impl IntoResponse> {
    validate_required("transaction_hash", &input.transaction_hash)?;
    validate_amount(input.amount)?;

    let method = PaymentMethodRepo::find_by_id(&state.pool, input.payment_method_id).await?;
    if !method.is_some_and(|m| m.is_active) {
        return Err(AppError::BadRequest(
            "Payment method is not available".into(),
        ));
    }

    let receipt = PaymentReceiptRepo::create(&state.pool, auth.user_id, &input).await?;

    state.event_bus.publish(
        PlatformEvent::new(RECEIPT_SUBMITTED)
            .with_source(ENTITY_PAYMENT_RECEIPT, receipt.id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({ "amount": receipt.amount })),
    );

    tracing::info!(
        receipt_id = receipt.id,
        user_id = auth.user_id,
        payment_method_id = receipt.payment_method_id,
        "Payment receipt submitted",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ReceiptView::from(receipt),
        }),
    ))
}
