//! Repository for the `payment_methods` table.

use sqlx::PgPool;
use webtoapp_core::types::DbId;

use crate::models::payment_method::{CreatePaymentMethod, PaymentMethod, UpdatePaymentMethod};

const COLUMNS: &str =
    "id, name, method_type, network, address, is_active, created_at, updated_at";

/// Provides CRUD operations for payment methods.
pub struct PaymentMethodRepo;

impl PaymentMethodRepo {
    /// List all payment methods, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PaymentMethod>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payment_methods ORDER BY created_at DESC");
        sqlx::query_as::<_, PaymentMethod>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PaymentMethod>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payment_methods WHERE id = $1");
        sqlx::query_as::<_, PaymentMethod>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreatePaymentMethod,
    ) -> Result<PaymentMethod, sqlx::Error> {
        let query = format!(
            "INSERT INTO payment_methods (name, method_type, network, address, is_active) \
             VALUES ($1, $2, $3, $4, COALESCE($5, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentMethod>(&query)
            .bind(&input.name)
            .bind(&input.method_type)
            .bind(&input.network)
            .bind(&input.address)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Update a payment method. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePaymentMethod,
    ) -> Result<Option<PaymentMethod>, sqlx::Error> {
        let query = format!(
            "UPDATE payment_methods SET \
                name = COALESCE($2, name), \
                method_type = COALESCE($3, method_type), \
                network = COALESCE($4, network), \
                address = COALESCE($5, address), \
                is_active = COALESCE($6, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PaymentMethod>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.method_type)
            .bind(&input.network)
            .bind(&input.address)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a payment method. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM payment_methods WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
