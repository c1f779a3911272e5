//! Handlers for the `/auth` resource (register, verify, login, current user).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;
use webtoapp_core::error::CoreError;
use webtoapp_core::validation::validate_verification_code;
use webtoapp_db::models::user::{CreateUser, UserResponse};
use webtoapp_db::repositories::UserRepo;
use webtoapp_events::bus::{ENTITY_USER, USER_EMAIL_VERIFIED, USER_REGISTERED};
use webtoapp_events::{Notification, PlatformEvent};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Request body for `POST /auth/verify-email`.
#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an unverified free-plan account and email a verification code.
/// A failed email send is logged; the account is still created.
pub async fn register(
    State(state): State<AppState>,
    Json(mut input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.email = normalize_email(&input.email);
    input.validate()?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "User already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email.clone(),
            password_hash,
            first_name: input.first_name.take(),
            last_name: input.last_name.take(),
        },
    )
    .await?;

    let code = state.verification_codes.issue(&user.email).await;
    if let Err(e) = state
        .notifier
        .notify(&user.email, &Notification::VerificationCode { code })
        .await
    {
        tracing::warn!(user_id = user.id, error = %e, "Failed to send verification email");
    }

    state.event_bus.publish(
        PlatformEvent::new(USER_REGISTERED)
            .with_source(ENTITY_USER, user.id)
            .with_actor(user.id),
    );

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// POST /api/v1/auth/verify-email
///
/// Consume a pending verification code and mark the account verified.
pub async fn verify_email(
    State(state): State<AppState>,
    Json(input): Json<VerifyEmailRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let code = input.code.trim();
    validate_verification_code(code)?;

    let email = normalize_email(&input.email);
    let mut user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if !state.verification_codes.consume(&email, code).await {
        return Err(AppError::BadRequest(
            "Invalid or expired verification code".into(),
        ));
    }

    UserRepo::mark_email_verified(&state.pool, user.id).await?;
    user.is_email_verified = true;

    state.event_bus.publish(
        PlatformEvent::new(USER_EMAIL_VERIFIED)
            .with_source(ENTITY_USER, user.id)
            .with_actor(user.id),
    );

    tracing::info!(user_id = user.id, "Email verified");

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns a bearer access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &normalize_email(&input.email))
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    let access_token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(user),
    }))
}

/// GET /api/v1/auth/user
///
/// The authenticated user's profile.
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}
