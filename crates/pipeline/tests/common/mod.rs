//! In-memory collaborators for runner tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use webtoapp_analysis::{AnalysisError, SiteAnalyzer};
use webtoapp_core::analysis::{AnalysisReport, CodePlan};
use webtoapp_core::types::DbId;
use webtoapp_db::models::app::{App, AppUpdate};
use webtoapp_db::models::status::AppStatus;
use webtoapp_events::EventBus;
use webtoapp_pipeline::{AppStore, GenerationDelays, JobRunner, StoreError};

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Predicate deciding whether a write should be rejected.
pub type FailWhen = Box<dyn Fn(&AppUpdate) -> bool + Send + Sync>;

/// `AppStore` over a `HashMap`, recording every successful write in order.
#[derive(Default)]
pub struct MemoryStore {
    apps: Mutex<HashMap<DbId, App>>,
    writes: Mutex<Vec<(DbId, AppUpdate)>>,
    fail_when: Option<FailWhen>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any write matching `predicate`.
    pub fn failing_when(predicate: impl Fn(&AppUpdate) -> bool + Send + Sync + 'static) -> Self {
        Self {
            fail_when: Some(Box::new(predicate)),
            ..Self::default()
        }
    }

    /// Insert a `pending` app and return its id.
    pub fn insert(&self, id: DbId, website_url: Option<&str>) -> DbId {
        let app = App {
            id,
            user_id: 1,
            name: format!("App {id}"),
            website_url: website_url.map(str::to_string),
            platform: "android".to_string(),
            mode: "online".to_string(),
            status_id: AppStatus::Pending.id(),
            ai_analysis: None,
            download_url: None,
            file_size: None,
            created_at: chrono::Utc::now(),
            completed_at: None,
        };
        self.apps.lock().unwrap().insert(id, app);
        id
    }

    pub fn app(&self, id: DbId) -> App {
        self.apps.lock().unwrap()[&id].clone()
    }

    /// Every successful write so far, across all apps.
    pub fn writes(&self) -> Vec<(DbId, AppUpdate)> {
        self.writes.lock().unwrap().clone()
    }

    /// Successful writes for one app.
    pub fn writes_for(&self, id: DbId) -> Vec<AppUpdate> {
        self.writes()
            .into_iter()
            .filter(|(app_id, _)| *app_id == id)
            .map(|(_, update)| update)
            .collect()
    }
}

#[async_trait]
impl AppStore for MemoryStore {
    async fn get(&self, id: DbId) -> Result<Option<App>, StoreError> {
        Ok(self.apps.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, id: DbId, update: &AppUpdate) -> Result<App, StoreError> {
        if self.fail_when.as_ref().is_some_and(|f| f(update)) {
            return Err(StoreError::Unavailable("injected write failure".into()));
        }
        let mut apps = self.apps.lock().unwrap();
        let app = apps.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        update.apply_to(app);
        self.writes.lock().unwrap().push((id, update.clone()));
        Ok(app.clone())
    }
}

// ---------------------------------------------------------------------------
// FakeAnalyzer
// ---------------------------------------------------------------------------

/// How a [`FakeAnalyzer`] answers.
pub enum Reply {
    /// Always this report.
    Fixed(AnalysisReport),
    /// A valid report whose first recommendation is the analyzed URL.
    EchoUrl,
    /// Every call fails as if the provider were unreachable.
    Unreachable,
}

pub struct FakeAnalyzer {
    reply: Reply,
    delay: Duration,
    analyze_calls: AtomicUsize,
}

impl FakeAnalyzer {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
            analyze_calls: AtomicUsize::new(0),
        }
    }

    /// Sleep this long inside every `analyze` call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SiteAnalyzer for FakeAnalyzer {
    async fn analyze(&self, url: &str) -> Result<AnalysisReport, AnalysisError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        match &self.reply {
            Reply::Fixed(report) => Ok(report.clone()),
            Reply::EchoUrl => {
                let mut report = AnalysisReport::fallback();
                report.recommendations[0] = url.to_string();
                Ok(report)
            }
            Reply::Unreachable => Err(AnalysisError::Transport("connection refused".into())),
        }
    }

    async fn plan_code(
        &self,
        _source: &str,
        _app_name: &str,
        _platform: &str,
    ) -> Result<CodePlan, AnalysisError> {
        match &self.reply {
            Reply::Unreachable => Err(AnalysisError::Transport("connection refused".into())),
            _ => Ok(CodePlan::fallback()),
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Millisecond-scale delays so tests stay fast but still interleave.
pub fn short_delays() -> GenerationDelays {
    GenerationDelays::uniform(Duration::from_millis(5))
}

pub fn runner(
    store: &Arc<MemoryStore>,
    analyzer: &Arc<FakeAnalyzer>,
    delays: GenerationDelays,
) -> (JobRunner, Arc<EventBus>) {
    let events = Arc::new(EventBus::default());
    let runner = JobRunner::new(store.clone(), analyzer.clone(), events.clone(), delays);
    (runner, events)
}
