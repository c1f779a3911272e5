//! The app generation job.
//!
//! A run performs, in order:
//!
//! 1. `status = generating`.
//! 2. For URL conversions: analyze the site, store the report in
//!    `ai_analysis` (status unchanged), pause for the analysis delay.
//! 3. Ask for a code plan, pause for code generation, pause for compilation.
//! 4. One terminal write setting `completed` together with the download
//!    path, package size, and completion time.
//!
//! Any fault ends the run with a single `status = failed` write. Runs are
//! single-attempt and not idempotent: running the same id twice repeats
//! every write.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use webtoapp_analysis::{AnalysisError, SiteAnalyzer};
use webtoapp_core::artifact::{download_path, random_artifact_size};
use webtoapp_core::types::DbId;
use webtoapp_db::models::app::{App, AppUpdate};
use webtoapp_db::models::status::AppStatus;
use webtoapp_events::bus::{
    APP_ANALYSIS_COMPLETED, APP_COMPLETED, APP_FAILED, APP_GENERATION_STARTED,
};
use webtoapp_events::{EventBus, PlatformEvent};

use crate::delays::GenerationDelays;
use crate::store::{AppStore, StoreError};

/// Source label passed to the code planner for uploaded projects.
const UPLOADED_PROJECT_SOURCE: &str = "uploaded-project";

/// Why a run stopped before completing.
#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Failed to encode analysis report: {0}")]
    Encode(#[from] serde_json::Error),
}

impl RunError {
    /// The app row is gone, so there is nothing to mark as failed.
    fn is_missing_record(&self) -> bool {
        matches!(self, RunError::Store(StoreError::NotFound(_)))
    }
}

/// Drives app records through generation.
///
/// Cheap to clone; every clone shares the same collaborators.
#[derive(Clone)]
pub struct JobRunner {
    store: Arc<dyn AppStore>,
    analyzer: Arc<dyn SiteAnalyzer>,
    events: Arc<EventBus>,
    delays: GenerationDelays,
}

impl JobRunner {
    pub fn new(
        store: Arc<dyn AppStore>,
        analyzer: Arc<dyn SiteAnalyzer>,
        events: Arc<EventBus>,
        delays: GenerationDelays,
    ) -> Self {
        Self {
            store,
            analyzer,
            events,
            delays,
        }
    }

    pub fn delays(&self) -> GenerationDelays {
        self.delays
    }

    /// Start a run on the Tokio runtime without waiting for it.
    ///
    /// The handle may be dropped; the run continues detached.
    pub fn spawn(&self, app_id: DbId) -> JoinHandle<()> {
        let runner = self.clone();
        tokio::spawn(async move { runner.run(app_id).await })
    }

    /// Run generation for one app to a terminal state.
    ///
    /// Never returns an error: faults are recorded on the app row and in
    /// the log.
    pub async fn run(&self, app_id: DbId) {
        tracing::info!(app_id, "App generation started");

        match self.generate(app_id).await {
            Ok(app) => {
                tracing::info!(
                    app_id,
                    file_size = ?app.file_size,
                    "App generation completed",
                );
            }
            Err(e) if e.is_missing_record() => {
                tracing::warn!(app_id, error = %e, "App record missing, generation abandoned");
            }
            Err(e) => {
                tracing::error!(app_id, error = %e, "App generation failed");
                self.mark_failed(app_id, &e).await;
            }
        }
    }

    async fn generate(&self, app_id: DbId) -> Result<App, RunError> {
        self.store
            .update(app_id, &AppUpdate::status(AppStatus::Generating))
            .await?;
        self.events
            .publish(PlatformEvent::for_app(APP_GENERATION_STARTED, app_id));

        let app = self
            .store
            .get(app_id)
            .await?
            .ok_or(StoreError::NotFound(app_id))?;

        let source = match app.website_url() {
            Some(url) => {
                self.analyze(app_id, url).await?;
                tokio::time::sleep(self.delays.analysis).await;
                url
            }
            None => UPLOADED_PROJECT_SOURCE,
        };

        let plan = self
            .analyzer
            .plan_code(source, &app.name, &app.platform)
            .await?;
        tracing::debug!(
            app_id,
            files = plan.code_structure.len(),
            optimizations = plan.optimizations.len(),
            estimated_build_minutes = plan.estimated_build_time,
            "Code plan ready",
        );

        tokio::time::sleep(self.delays.code_generation).await;
        tokio::time::sleep(self.delays.compilation).await;

        let completed = AppUpdate::completed(download_path(app_id), random_artifact_size(), Utc::now());
        let app = self.store.update(app_id, &completed).await?;

        self.events.publish(
            PlatformEvent::for_app(APP_COMPLETED, app_id).with_payload(serde_json::json!({
                "download_url": app.download_url,
                "file_size": app.file_size,
            })),
        );
        Ok(app)
    }

    /// Analyze the site and store the report without touching the status.
    async fn analyze(&self, app_id: DbId, url: &str) -> Result<(), RunError> {
        let report = self.analyzer.analyze(url).await?;
        let value = serde_json::to_value(&report)?;
        self.store
            .update(app_id, &AppUpdate::analysis(value))
            .await?;

        tracing::debug!(app_id, content_type = ?report.content_type, "Website analysis stored");
        self.events.publish(
            PlatformEvent::for_app(APP_ANALYSIS_COMPLETED, app_id).with_payload(
                serde_json::json!({
                    "compatible": report.compatible,
                    "content_type": report.content_type,
                }),
            ),
        );
        Ok(())
    }

    async fn mark_failed(&self, app_id: DbId, cause: &RunError) {
        match self
            .store
            .update(app_id, &AppUpdate::status(AppStatus::Failed))
            .await
        {
            Ok(_) => {
                self.events.publish(
                    PlatformEvent::for_app(APP_FAILED, app_id)
                        .with_payload(serde_json::json!({ "error": cause.to_string() })),
                );
            }
            Err(e) => {
                tracing::error!(app_id, error = %e, "Failed to mark app as failed");
            }
        }
    }
}
