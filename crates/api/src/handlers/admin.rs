//! Handlers for the `/admin` resources.
//!
//! Every endpoint requires the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use webtoapp_core::error::CoreError;
use webtoapp_core::types::DbId;
use webtoapp_core::validation::{
    validate_plan, validate_required, validate_revenue_share, validate_role, PLAN_PRO,
};
use webtoapp_db::models::ad_source::{CreateAdSource, UpdateAdSource};
use webtoapp_db::models::payment_method::{CreatePaymentMethod, UpdatePaymentMethod};
use webtoapp_db::models::status::ReceiptStatus;
use webtoapp_db::models::user::UserResponse;
use webtoapp_db::repositories::{
    AdSourceRepo, AdminSettingRepo, PaymentMethodRepo, PaymentReceiptRepo, UserRepo,
};
use webtoapp_events::bus::{
    ENTITY_PAYMENT_RECEIPT, ENTITY_USER, RECEIPT_REVIEWED, USER_PLAN_CHANGED,
};
use webtoapp_events::{Notification, PlatformEvent};

use super::payments::ReceiptView;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /admin/users/{id}/plan`.
#[derive(Debug, Deserialize)]
pub struct UpdatePlanRequest {
    pub plan: String,
}

/// Request body for `PATCH /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// Request body for `PATCH /admin/payment-receipts/{id}`.
#[derive(Debug, Deserialize)]
pub struct ReviewReceiptRequest {
    /// `verified` or `rejected`.
    pub status: String,
}

/// Request body for `PUT /admin/settings/{key}`.
#[derive(Debug, Deserialize)]
pub struct SettingValue {
    pub value: String,
}

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list(&state.pool).await?;
    let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

/// PATCH /api/v1/admin/users/{id}/plan
///
/// Change a user's plan. Moving a user onto `pro` emails an upgrade notice;
/// a failed send is logged and does not undo the change.
pub async fn update_user_plan(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<UpdatePlanRequest>,
) -> AppResult<impl IntoResponse> {
    validate_plan(&input.plan)?;

    let previous = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| not_found("User", user_id))?;
    let user = UserRepo::update_plan(&state.pool, user_id, &input.plan)
        .await?
        .ok_or_else(|| not_found("User", user_id))?;

    state.event_bus.publish(
        PlatformEvent::new(USER_PLAN_CHANGED)
            .with_source(ENTITY_USER, user.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({
                "from": previous.plan,
                "to": user.plan,
            })),
    );

    if user.plan == PLAN_PRO && previous.plan != PLAN_PRO {
        let notification = Notification::PlanUpgraded {
            plan: user.plan.clone(),
        };
        if let Err(e) = state.notifier.notify(&user.email, &notification).await {
            tracing::warn!(user_id = user.id, error = %e, "Failed to send plan upgrade email");
        }
    }

    tracing::info!(
        user_id = user.id,
        admin_id = admin.user_id,
        plan = %user.plan,
        "User plan changed",
    );

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// PATCH /api/v1/admin/users/{id}/role
///
/// Admins cannot demote themselves.
pub async fn update_user_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<impl IntoResponse> {
    validate_role(&input.role)?;
    if user_id == admin.user_id && input.role != admin.role {
        return Err(AppError::BadRequest("Cannot change your own role".into()));
    }

    let user = UserRepo::update_role(&state.pool, user_id, &input.role)
        .await?
        .ok_or_else(|| not_found("User", user_id))?;

    tracing::info!(user_id, admin_id = admin.user_id, role = %user.role, "User role changed");

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Removes the user together with their apps and receipts. Admins cannot
/// delete their own account.
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if user_id == admin.user_id {
        return Err(AppError::BadRequest("Cannot delete your own account".into()));
    }
    if !UserRepo::delete(&state.pool, user_id).await? {
        return Err(not_found("User", user_id));
    }

    tracing::info!(user_id, admin_id = admin.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Payment methods
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/payment-methods
pub async fn list_payment_methods(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let methods = PaymentMethodRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: methods }))
}

/// POST /api/v1/admin/payment-methods
pub async fn create_payment_method(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePaymentMethod>,
) -> AppResult<impl IntoResponse> {
    validate_required("name", &input.name)?;
    validate_required("method_type", &input.method_type)?;
    validate_required("network", &input.network)?;
    validate_required("address", &input.address)?;

    let method = PaymentMethodRepo::create(&state.pool, &input).await?;
    tracing::info!(
        payment_method_id = method.id,
        admin_id = admin.user_id,
        "Payment method created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: method })))
}

/// PATCH /api/v1/admin/payment-methods/{id}
pub async fn update_payment_method(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePaymentMethod>,
) -> AppResult<impl IntoResponse> {
    for (field, value) in [
        ("name", &input.name),
        ("method_type", &input.method_type),
        ("network", &input.network),
        ("address", &input.address),
    ] {
        if let Some(value) = value {
            validate_required(field, value)?;
        }
    }

    let method = PaymentMethodRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("PaymentMethod", id))?;
    tracing::info!(payment_method_id = id, admin_id = admin.user_id, "Payment method updated");
    Ok(Json(DataResponse { data: method }))
}

/// DELETE /api/v1/admin/payment-methods/{id}
pub async fn delete_payment_method(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !PaymentMethodRepo::delete(&state.pool, id).await? {
        return Err(not_found("PaymentMethod", id));
    }
    tracing::info!(payment_method_id = id, admin_id = admin.user_id, "Payment method deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Ad sources
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/ad-sources
pub async fn list_ad_sources(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let sources = AdSourceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: sources }))
}

/// POST /api/v1/admin/ad-sources
pub async fn create_ad_source(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateAdSource>,
) -> AppResult<impl IntoResponse> {
    validate_required("name", &input.name)?;
    validate_required("source_type", &input.source_type)?;
    validate_revenue_share(input.revenue_share)?;

    let source = AdSourceRepo::create(&state.pool, &input).await?;
    tracing::info!(ad_source_id = source.id, admin_id = admin.user_id, "Ad source created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: source })))
}

/// PATCH /api/v1/admin/ad-sources/{id}
pub async fn update_ad_source(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAdSource>,
) -> AppResult<impl IntoResponse> {
    if let Some(share) = input.revenue_share {
        validate_revenue_share(share)?;
    }

    let source = AdSourceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("AdSource", id))?;
    tracing::info!(ad_source_id = id, admin_id = admin.user_id, "Ad source updated");
    Ok(Json(DataResponse { data: source }))
}

/// DELETE /api/v1/admin/ad-sources/{id}
pub async fn delete_ad_source(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !AdSourceRepo::delete(&state.pool, id).await? {
        return Err(not_found("AdSource", id));
    }
    tracing::info!(ad_source_id = id, admin_id = admin.user_id, "Ad source deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Payment receipts
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/payment-receipts
pub async fn list_all_receipts(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let receipts = PaymentReceiptRepo::list_all(&state.pool).await?;
    let data: Vec<ReceiptView> = receipts.into_iter().map(ReceiptView::from).collect();
    Ok(Json(DataResponse { data }))
}

/// PATCH /api/v1/admin/payment-receipts/{id}
///
/// Mark a receipt `verified` (stamps `verified_at`) or `rejected`.
pub async fn review_receipt(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewReceiptRequest>,
) -> AppResult<impl IntoResponse> {
    let status = match ReceiptStatus::from_name(&input.status) {
        Some(s @ (ReceiptStatus::Verified | ReceiptStatus::Rejected)) => s,
        _ => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid status '{}'. Must be one of: verified, rejected",
                input.status
            ))))
        }
    };

    let receipt = PaymentReceiptRepo::set_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| not_found("PaymentReceipt", id))?;

    state.event_bus.publish(
        PlatformEvent::new(RECEIPT_REVIEWED)
            .with_source(ENTITY_PAYMENT_RECEIPT, receipt.id)
            .with_actor(admin.user_id)
            .with_payload(serde_json::json!({ "status": status.name() })),
    );

    tracing::info!(
        receipt_id = id,
        admin_id = admin.user_id,
        status = status.name(),
        "Payment receipt reviewed",
    );

    Ok(Json(DataResponse {
        data: ReceiptView::from(receipt),
    }))
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/settings/{key}
pub async fn get_setting(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let setting = AdminSettingRepo::get(&state.pool, &key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Setting '{key}' not found")))?;
    Ok(Json(DataResponse { data: setting }))
}

/// PUT /api/v1/admin/settings/{key}
pub async fn put_setting(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<SettingValue>,
) -> AppResult<impl IntoResponse> {
    let setting = AdminSettingRepo::upsert(&state.pool, &key, &input.value).await?;
    tracing::info!(key = %key, admin_id = admin.user_id, "Admin setting saved");
    Ok(Json(DataResponse { data: setting }))
}
