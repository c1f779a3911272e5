//! Simulated app artifact: download location and package size.
//!
//! No real package is built. A completed app gets a deterministic download
//! path and a pseudo-random size so the dashboard has something to show.

use std::ops::Range;

use rand::Rng;

use crate::types::DbId;

/// Smallest simulated package size in bytes (inclusive).
pub const MIN_ARTIFACT_SIZE: i32 = 2_000_000;
/// Largest simulated package size in bytes (exclusive).
pub const MAX_ARTIFACT_SIZE: i32 = 8_000_000;

/// Half-open range of simulated package sizes.
pub const ARTIFACT_SIZE_RANGE: Range<i32> = MIN_ARTIFACT_SIZE..MAX_ARTIFACT_SIZE;

/// MIME type used when serving the placeholder package.
pub const PACKAGE_CONTENT_TYPE: &str = "application/vnd.android.package-archive";

/// Download path served by the API for a completed app.
pub fn download_path(app_id: DbId) -> String {
    format!("/api/v1/apps/{app_id}/download")
}

/// Pick a package size uniformly from [`ARTIFACT_SIZE_RANGE`].
pub fn random_artifact_size() -> i32 {
    rand::rng().random_range(ARTIFACT_SIZE_RANGE)
}

/// Attachment filename for an app's package.
///
/// Characters that would break a `Content-Disposition` header are replaced
/// with underscores.
pub fn package_filename(app_name: &str) -> String {
    let cleaned: String = app_name
        .trim()
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' | '\r' | '\n' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "app.apk".to_string()
    } else {
        format!("{cleaned}.apk")
    }
}

/// Body of the placeholder package.
pub fn placeholder_package(app_name: &str, generated_at: &str) -> String {
    format!("Mock APK for {app_name}\nGenerated at: {generated_at}")
}
