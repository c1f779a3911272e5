//! Input validation for conversion requests and admin records.
//!
//! Every accepted literal is a named constant; handlers call these helpers
//! before touching the database.

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_USER};

// ---------------------------------------------------------------------------
// Platforms, modes, plans
// ---------------------------------------------------------------------------

pub const PLATFORM_ANDROID: &str = "android";
pub const PLATFORM_IOS: &str = "ios";
pub const PLATFORM_DESKTOP: &str = "desktop";

/// All target platforms a conversion can request.
pub const VALID_PLATFORMS: &[&str] = &[PLATFORM_ANDROID, PLATFORM_IOS, PLATFORM_DESKTOP];

pub const MODE_ONLINE: &str = "online";
pub const MODE_OFFLINE: &str = "offline";

/// All app runtime modes.
pub const VALID_MODES: &[&str] = &[MODE_ONLINE, MODE_OFFLINE];

pub const PLAN_FREE: &str = "free";
pub const PLAN_PRO: &str = "pro";

/// All subscription plans.
pub const VALID_PLANS: &[&str] = &[PLAN_FREE, PLAN_PRO];

/// Maximum length of an app name.
pub const MAX_APP_NAME_LEN: usize = 100;

/// Maximum accepted size of an uploaded project archive (100 MiB).
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Length of an email verification code.
pub const VERIFICATION_CODE_LEN: usize = 6;

fn validate_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        )))
    }
}

pub fn validate_platform(platform: &str) -> Result<(), CoreError> {
    validate_one_of("platform", platform, VALID_PLATFORMS)
}

pub fn validate_mode(mode: &str) -> Result<(), CoreError> {
    validate_one_of("mode", mode, VALID_MODES)
}

pub fn validate_plan(plan: &str) -> Result<(), CoreError> {
    validate_one_of("plan", plan, VALID_PLANS)
}

pub fn validate_role(role: &str) -> Result<(), CoreError> {
    validate_one_of("role", role, &[ROLE_ADMIN, ROLE_USER])
}

/// App names must be non-blank and at most [`MAX_APP_NAME_LEN`] characters.
pub fn validate_app_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("App name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_APP_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "App name must be at most {MAX_APP_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Website URLs must be absolute `http` or `https` URLs with a host.
pub fn validate_website_url(url: &str) -> Result<(), CoreError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| {
            CoreError::Validation("Website URL must start with http:// or https://".into())
        })?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation("Website URL must include a host".into()));
    }
    Ok(())
}

/// Normalize an optional URL from a request: blank strings count as absent.
pub fn normalize_optional_url(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}

// ---------------------------------------------------------------------------
// Admin records
// ---------------------------------------------------------------------------

/// Ad revenue share is a percentage in `[0, 100]`.
pub fn validate_revenue_share(share: f32) -> Result<(), CoreError> {
    if share.is_finite() && (0.0..=100.0).contains(&share) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "revenue_share must be between 0 and 100".into(),
        ))
    }
}

/// Payment amounts must be positive.
pub fn validate_amount(amount: f32) -> Result<(), CoreError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Validation("amount must be positive".into()))
    }
}

/// Required free-text fields must not be blank.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

/// Verification codes are exactly [`VERIFICATION_CODE_LEN`] ASCII digits.
pub fn validate_verification_code(code: &str) -> Result<(), CoreError> {
    if code.len() == VERIFICATION_CODE_LEN && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Code must be {VERIFICATION_CODE_LEN} digits"
        )))
    }
}

// ---------------------------------------------------------------------------
// Upload checks
// ---------------------------------------------------------------------------

/// Accept an upload only when it looks like a zip archive.
pub fn is_zip_upload(file_name: Option<&str>, content_type: Option<&str>) -> bool {
    let by_type = content_type == Some("application/zip");
    let by_name = file_name
        .map(|n| n.to_ascii_lowercase().ends_with(".zip"))
        .unwrap_or(false);
    by_type || by_name
}
