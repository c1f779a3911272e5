//! App conversion entity models and DTOs.
//!
//! An `apps` row doubles as the conversion job record: the generation runner
//! advances `status_id` and fills in the analysis and artifact columns.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use webtoapp_core::analysis::AnalysisReport;
use webtoapp_core::types::{DbId, Timestamp};

use super::status::{AppStatus, StatusId};

/// A row from the `apps` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct App {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub website_url: Option<String>,
    pub platform: String,
    pub mode: String,
    pub status_id: StatusId,
    pub ai_analysis: Option<serde_json::Value>,
    pub download_url: Option<String>,
    pub file_size: Option<i32>,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl App {
    /// Resolve `status_id` into an [`AppStatus`].
    pub fn status(&self) -> Option<AppStatus> {
        AppStatus::from_id(self.status_id)
    }

    /// Website URL, treating an empty string as absent.
    pub fn website_url(&self) -> Option<&str> {
        self.website_url.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// Parse the stored analysis, if any.
    pub fn analysis(&self) -> Option<AnalysisReport> {
        self.ai_analysis
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Progress label shown to clients.
    ///
    /// The runner goes straight from `pending` to `generating`, storing the
    /// analysis while still `generating`. A URL conversion that is
    /// `generating` without an analysis yet is reported as `analyzing`.
    pub fn stage(&self) -> &'static str {
        match self.status() {
            Some(AppStatus::Generating)
                if self.website_url().is_some() && self.ai_analysis.is_none() =>
            {
                AppStatus::Analyzing.name()
            }
            Some(status) => status.name(),
            None => "unknown",
        }
    }
}

/// DTO for inserting a new `pending` app.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateApp {
    pub user_id: DbId,
    pub name: String,
    pub website_url: Option<String>,
    pub platform: String,
    pub mode: String,
}

/// Partial update applied to an app in a single statement.
///
/// Only `Some` fields are written. The constructors cover the three writes
/// the generation runner performs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppUpdate {
    pub status: Option<AppStatus>,
    pub ai_analysis: Option<serde_json::Value>,
    pub download_url: Option<String>,
    pub file_size: Option<i32>,
    pub completed_at: Option<Timestamp>,
}

impl AppUpdate {
    /// Change only the status.
    pub fn status(status: AppStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Store an analysis report without touching the status.
    pub fn analysis(report: serde_json::Value) -> Self {
        Self {
            ai_analysis: Some(report),
            ..Self::default()
        }
    }

    /// The terminal success write: status and all artifact fields together.
    pub fn completed(download_url: String, file_size: i32, completed_at: Timestamp) -> Self {
        Self {
            status: Some(AppStatus::Completed),
            download_url: Some(download_url),
            file_size: Some(file_size),
            completed_at: Some(completed_at),
            ..Self::default()
        }
    }

    /// Apply this update to an in-memory row, mirroring the SQL semantics.
    pub fn apply_to(&self, app: &mut App) {
        if let Some(status) = self.status {
            app.status_id = status.id();
        }
        if let Some(analysis) = &self.ai_analysis {
            app.ai_analysis = Some(analysis.clone());
        }
        if let Some(url) = &self.download_url {
            app.download_url = Some(url.clone());
        }
        if let Some(size) = self.file_size {
            app.file_size = Some(size);
        }
        if let Some(at) = self.completed_at {
            app.completed_at = Some(at);
        }
    }
}

/// Query parameters for `GET /api/v1/apps`.
#[derive(Debug, Deserialize)]
pub struct AppListQuery {
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}
