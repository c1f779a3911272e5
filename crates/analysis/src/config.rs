//! OpenAI client configuration loaded from environment variables.

/// Default chat completion model.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default API base URL (no trailing slash).
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL without a trailing slash, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `OPENAI_API_KEY` is not set, in which case the
    /// caller should use [`OfflineAnalyzer`](crate::OfflineAnalyzer).
    ///
    /// | Variable              | Required | Default                     |
    /// |-----------------------|----------|-----------------------------|
    /// | `OPENAI_API_KEY`      | yes      |                             |
    /// | `OPENAI_MODEL`        | no       | `gpt-4o`                    |
    /// | `OPENAI_BASE_URL`     | no       | `https://api.openai.com/v1` |
    /// | `OPENAI_TIMEOUT_SECS` | no       | `30`                        |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        Some(Self {
            api_key,
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout_secs: std::env::var("OPENAI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Configuration pointing at an arbitrary base URL with defaults elsewhere.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
