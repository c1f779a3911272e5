//! Outbound user notifications.
//!
//! Handlers depend on the [`Notifier`] trait so that SMTP delivery can be
//! swapped for [`LogNotifier`] when no mail server is configured, or for a
//! recording fake in tests.

use async_trait::async_trait;

use crate::delivery::email::EmailError;
use crate::templates;

/// Minutes a verification code stays valid.
pub const VERIFICATION_CODE_TTL_MINUTES: i64 = 15;

/// A message addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Six-digit code sent after registration.
    VerificationCode { code: String },
    /// Sent when an admin moves a user onto a paid plan.
    PlanUpgraded { plan: String },
}

impl Notification {
    pub fn subject(&self) -> String {
        match self {
            Notification::VerificationCode { .. } => templates::verification_subject(),
            Notification::PlanUpgraded { plan } => templates::plan_upgrade_subject(plan),
        }
    }

    pub fn text_body(&self) -> String {
        match self {
            Notification::VerificationCode { code } => templates::verification_text(code),
            Notification::PlanUpgraded { plan } => templates::plan_upgrade_text(plan),
        }
    }

    pub fn html_body(&self) -> String {
        match self {
            Notification::VerificationCode { code } => templates::verification_html(code),
            Notification::PlanUpgraded { plan } => templates::plan_upgrade_html(plan),
        }
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::VerificationCode { .. } => "verification_code",
            Notification::PlanUpgraded { .. } => "plan_upgraded",
        }
    }
}

/// Delivers a [`Notification`] to an email address.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, to_email: &str, notification: &Notification) -> Result<(), EmailError>;
}

/// Notifier used when SMTP is not configured: writes the message to the log.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, to_email: &str, notification: &Notification) -> Result<(), EmailError> {
        tracing::info!(
            to = to_email,
            kind = notification.kind(),
            subject = %notification.subject(),
            body = %notification.text_body(),
            "SMTP not configured, notification logged instead of sent"
        );
        Ok(())
    }
}
