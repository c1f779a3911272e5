//! Website analysis for app conversion.
//!
//! [`SiteAnalyzer`] is the seam the generation runner and the
//! `analyze-website` endpoint call through. Two implementations ship:
//!
//! - [`OpenAiAnalyzer`] -- asks an OpenAI-compatible chat completion API.
//! - [`OfflineAnalyzer`] -- returns the fixed fallback report and plan, used
//!   when no API key is configured.
//!
//! Both honour the same contract: a malformed or out-of-range model reply is
//! never an error, it degrades to [`AnalysisReport::fallback`]. Only a
//! failure to reach the provider at all surfaces as
//! [`AnalysisError::Transport`].

use async_trait::async_trait;
use webtoapp_core::analysis::{AnalysisReport, CodePlan};

pub mod config;
pub mod openai;
mod prompts;

pub use config::OpenAiConfig;
pub use openai::OpenAiAnalyzer;

/// Errors a [`SiteAnalyzer`] may return.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The analysis provider could not be reached (connect, DNS, TLS, timeout).
    #[error("Analysis provider unreachable: {0}")]
    Transport(String),
}

/// Maps a website to a compatibility report and a code-generation plan.
#[async_trait]
pub trait SiteAnalyzer: Send + Sync {
    /// Analyze a website URL for mobile app conversion.
    async fn analyze(&self, url: &str) -> Result<AnalysisReport, AnalysisError>;

    /// Produce a code-generation plan for converting `source` into an app.
    async fn plan_code(
        &self,
        source: &str,
        app_name: &str,
        platform: &str,
    ) -> Result<CodePlan, AnalysisError>;
}

/// Analyzer that never calls out and always answers with the fallbacks.
pub struct OfflineAnalyzer;

#[async_trait]
impl SiteAnalyzer for OfflineAnalyzer {
    async fn analyze(&self, url: &str) -> Result<AnalysisReport, AnalysisError> {
        tracing::debug!(url, "No analysis provider configured, using fallback report");
        Ok(AnalysisReport::fallback())
    }

    async fn plan_code(
        &self,
        _source: &str,
        _app_name: &str,
        _platform: &str,
    ) -> Result<CodePlan, AnalysisError> {
        Ok(CodePlan::fallback())
    }
}
