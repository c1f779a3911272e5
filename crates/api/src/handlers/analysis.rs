//! Standalone analysis endpoints used by the conversion wizard before an
//! app is created.

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use webtoapp_core::analysis::ProjectAnalysis;
use webtoapp_core::validation::{is_zip_upload, validate_website_url, MAX_UPLOAD_BYTES};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the project archive.
const PROJECT_FIELD: &str = "project";

/// Request body for `POST /analyze-website`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeWebsiteRequest {
    #[serde(default)]
    pub url: String,
}

/// POST /api/v1/analyze-website
///
/// Run the site analyzer on a URL and return its report. An unusable
/// provider reply still yields the fallback report; only a provider that
/// cannot be reached is an error.
pub async fn analyze_website(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<AnalyzeWebsiteRequest>,
) -> AppResult<impl IntoResponse> {
    let url = input.url.trim();
    if url.is_empty() {
        return Err(AppError::BadRequest("URL is required".into()));
    }
    validate_website_url(url)?;

    let report = state.analyzer.analyze(url).await.map_err(|e| {
        tracing::error!(user_id = auth.user_id, url, error = %e, "Website analysis failed");
        AppError::InternalError(format!("Failed to analyze website: {e}"))
    })?;

    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/upload-project
///
/// Accept a zipped website project (multipart field `project`). The archive
/// is not inspected; a fixed project analysis is returned.
pub async fn upload_project(
    auth: AuthUser,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut upload: Option<(String, usize)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(PROJECT_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        if !is_zip_upload(file_name.as_deref(), content_type.as_deref()) {
            return Err(AppError::BadRequest("Only ZIP files are allowed".into()));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::BadRequest(format!(
                "Project archive exceeds {} MiB",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        upload = Some((file_name.unwrap_or_else(|| "project.zip".into()), data.len()));
    }

    let (file_name, size) =
        upload.ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;

    tracing::info!(user_id = auth.user_id, file_name = %file_name, size, "Project uploaded");

    Ok(Json(DataResponse {
        data: ProjectAnalysis::uploaded_project(),
    }))
}
