//! Payment receipt entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use webtoapp_core::types::{DbId, Timestamp};

use super::status::{ReceiptStatus, StatusId};

/// A row from the `payment_receipts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentReceipt {
    pub id: DbId,
    pub user_id: DbId,
    pub payment_method_id: DbId,
    pub transaction_hash: String,
    pub amount: f32,
    pub status_id: StatusId,
    pub submitted_at: Timestamp,
    pub verified_at: Option<Timestamp>,
}

impl PaymentReceipt {
    /// Resolve `status_id` into a [`ReceiptStatus`].
    pub fn status(&self) -> Option<ReceiptStatus> {
        ReceiptStatus::from_id(self.status_id)
    }
}

/// DTO for submitting a receipt. `user_id` comes from the token, not the body.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentReceipt {
    pub payment_method_id: DbId,
    pub transaction_hash: String,
    pub amount: f32,
}
