use std::sync::Arc;

use webtoapp_analysis::SiteAnalyzer;
use webtoapp_events::{EventBus, Notifier};
use webtoapp_pipeline::JobRunner;

use crate::auth::verification::VerificationCodes;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind an `Arc` or is itself a handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: webtoapp_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing platform events.
    pub event_bus: Arc<EventBus>,
    /// Starts generation runs for newly created apps.
    pub runner: JobRunner,
    /// Website analyzer, shared with the runner.
    pub analyzer: Arc<dyn SiteAnalyzer>,
    /// Outbound email (SMTP or log-only).
    pub notifier: Arc<dyn Notifier>,
    /// Pending email verification codes.
    pub verification_codes: Arc<VerificationCodes>,
}
