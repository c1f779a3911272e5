//! Payment method entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use webtoapp_core::types::{DbId, Timestamp};

/// A row from the `payment_methods` table (e.g. a crypto wallet address).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentMethod {
    pub id: DbId,
    pub name: String,
    pub method_type: String,
    pub network: String,
    pub address: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a payment method.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentMethod {
    pub name: String,
    pub method_type: String,
    pub network: String,
    pub address: String,
    pub is_active: Option<bool>,
}

/// DTO for updating a payment method. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePaymentMethod {
    pub name: Option<String>,
    pub method_type: Option<String>,
    pub network: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}
