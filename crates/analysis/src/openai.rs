//! Analyzer backed by an OpenAI-compatible chat completion endpoint.
//!
//! Each call is one `POST {base_url}/chat/completions` in JSON mode. The
//! reply content is parsed into the core report types; anything short of a
//! well-formed report is replaced by the fixed fallback.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use webtoapp_core::analysis::{AnalysisReport, CodePlan};

use crate::config::OpenAiConfig;
use crate::prompts;
use crate::{AnalysisError, SiteAnalyzer};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Why a completion did not yield a usable value.
#[derive(Debug, thiserror::Error)]
enum ReplyError {
    /// The request never got a response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("provider returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The provider answered, but not with the expected JSON.
    #[error("malformed reply: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// OpenAiAnalyzer
// ---------------------------------------------------------------------------

/// [`SiteAnalyzer`] that asks an OpenAI chat model.
pub struct OpenAiAnalyzer {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiAnalyzer {
    /// Build an analyzer with its own HTTP client using the configured timeout.
    pub fn new(config: OpenAiConfig) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Run one JSON-mode completion and deserialize the reply content.
    async fn complete_json<T: DeserializeOwned>(
        &self,
        system: &str,
        user: &str,
    ) -> Result<T, ReplyError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ReplyError::Malformed(e.to_string()))?;
        if !status.is_success() {
            return Err(ReplyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ReplyError::Malformed(e.to_string()))?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ReplyError::Malformed("reply has no content".to_string()))?;
        serde_json::from_str(&content).map_err(|e| ReplyError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl SiteAnalyzer for OpenAiAnalyzer {
    async fn analyze(&self, url: &str) -> Result<AnalysisReport, AnalysisError> {
        let reply = self
            .complete_json::<AnalysisReport>(prompts::ANALYZE_SYSTEM, &prompts::analyze_user(url))
            .await;

        match reply {
            Ok(report) => match report.validate() {
                Ok(()) => Ok(report),
                Err(e) => {
                    tracing::warn!(url, error = %e, "Analysis reply out of range, using fallback");
                    Ok(AnalysisReport::fallback())
                }
            },
            Err(ReplyError::Transport(e)) => Err(AnalysisError::Transport(e.to_string())),
            Err(e) => {
                tracing::warn!(url, error = %e, "Analysis reply unusable, using fallback");
                Ok(AnalysisReport::fallback())
            }
        }
    }

    async fn plan_code(
        &self,
        source: &str,
        app_name: &str,
        platform: &str,
    ) -> Result<CodePlan, AnalysisError> {
        let reply = self
            .complete_json::<CodePlan>(
                &prompts::plan_system(platform),
                &prompts::plan_user(source, app_name, platform),
            )
            .await;

        match reply {
            Ok(plan) => Ok(plan),
            Err(ReplyError::Transport(e)) => Err(AnalysisError::Transport(e.to_string())),
            Err(e) => {
                tracing::warn!(app_name, error = %e, "Code plan reply unusable, using fallback");
                Ok(CodePlan::fallback())
            }
        }
    }
}
