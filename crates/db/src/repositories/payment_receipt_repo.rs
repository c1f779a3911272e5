//! Repository for the `payment_receipts` table.

use sqlx::PgPool;
use webtoapp_core::types::DbId;

use crate::models::payment_receipt::{CreatePaymentReceipt, PaymentReceipt};
use crate::models::status::ReceiptStatus;

const COLUMNS: &str = "id, user_id, payment_method_id, transaction_hash, amount, status_id, \
                       submitted_at, verified_at";

/// Provides read/write operations for payment receipts.
pub struct PaymentReceiptRepo;

impl PaymentReceiptRepo {
    /// List every receipt, most recently submitted first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<PaymentReceipt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payment_receipts ORDER BY submitted_at DESC");
        sqlx::query_as::<_, PaymentReceipt>(&query)
            .fetch_all(pool)
            .await
    }

    /// List one user's receipts, most recently submitted first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PaymentReceipt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payment_receipts WHERE user_id = $1 \
             ORDER BY submitted_at DESC"
        );
        sqlx::query_as::<_, PaymentReceipt>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PaymentReceipt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payment_receipts WHERE id = $1");
        sqlx::query_as::<_, PaymentReceipt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record a newly submitted receipt in `pending` status.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreatePaymentReceipt,
    ) -> Result<PaymentReceipt, sqlx::Error> {
        let query = format!(
            "INSERT INTO payment_receipts \
                (user_id, payment_method_id, transaction_hash, amount, status_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentReceipt>(&query)
            .bind(user_id)
            .bind(input.payment_method_id)
            .bind(&input.transaction_hash)
            .bind(input.amount)
            .bind(ReceiptStatus::Pending.id())
            .fetch_one(pool)
            .await
    }

    /// Move a receipt to a review status.
    ///
    /// `verified_at` is stamped when the new status is `Verified` and cleared
    /// otherwise. Returns `None` if no row with the given `id` exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: ReceiptStatus,
    ) -> Result<Option<PaymentReceipt>, sqlx::Error> {
        let query = format!(
            "UPDATE payment_receipts SET \
                status_id = $2, \
                verified_at = CASE WHEN $2 = $3 THEN NOW() ELSE NULL END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentReceipt>(&query)
            .bind(id)
            .bind(status.id())
            .bind(ReceiptStatus::Verified.id())
            .fetch_optional(pool)
            .await
    }
}
