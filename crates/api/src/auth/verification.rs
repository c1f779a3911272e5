//! Email verification codes.
//!
//! Codes live in memory only: a restart invalidates every pending code and
//! the user asks for a new one. Each code is single-use and expires after
//! [`VERIFICATION_CODE_TTL_MINUTES`].

use std::collections::HashMap;

use chrono::{Duration, Utc};
use rand::Rng;
use tokio::sync::Mutex;
use webtoapp_core::types::Timestamp;
use webtoapp_core::validation::VERIFICATION_CODE_LEN;
use webtoapp_events::notifier::VERIFICATION_CODE_TTL_MINUTES;

/// Pending verification codes keyed by lowercase email.
#[derive(Debug, Default)]
pub struct VerificationCodes {
    codes: Mutex<HashMap<String, (String, Timestamp)>>,
}

impl VerificationCodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate and remember a fresh code for `email`, replacing any
    /// earlier one.
    pub async fn issue(&self, email: &str) -> String {
        let code = generate_code();
        let expires_at = Utc::now() + Duration::minutes(VERIFICATION_CODE_TTL_MINUTES);
        self.codes
            .lock()
            .await
            .insert(email.to_lowercase(), (code.clone(), expires_at));
        code
    }

    /// Check `code` for `email`. A matching unexpired code is removed and
    /// `true` returned; an expired entry is dropped either way.
    pub async fn consume(&self, email: &str, code: &str) -> bool {
        let key = email.to_lowercase();
        let mut codes = self.codes.lock().await;
        match codes.get(&key) {
            Some((_, expires_at)) if *expires_at <= Utc::now() => {
                codes.remove(&key);
                false
            }
            Some((stored, _)) if stored == code => {
                codes.remove(&key);
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    async fn force_expire(&self, email: &str) {
        if let Some(entry) = self.codes.lock().await.get_mut(&email.to_lowercase()) {
            entry.1 = Utc::now() - Duration::seconds(1);
        }
    }
}

/// A zero-padded random numeric code of [`VERIFICATION_CODE_LEN`] digits.
fn generate_code() -> String {
    let upper = 10u32.pow(VERIFICATION_CODE_LEN as u32);
    format!(
        "{:0width$}",
        rand::rng().random_range(0..upper),
        width = VERIFICATION_CODE_LEN
    )
}
