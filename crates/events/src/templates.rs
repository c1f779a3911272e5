//! Email subjects and bodies.

use crate::notifier::VERIFICATION_CODE_TTL_MINUTES;

const BRAND: &str = "WebToApp AI";

pub fn verification_subject() -> String {
    format!("Verify your email address - {BRAND}")
}

pub fn verification_text(code: &str) -> String {
    format!(
        "Welcome to {BRAND}!\n\n\
         Please verify your email address by entering this code: {code}\n\n\
         This code will expire in {VERIFICATION_CODE_TTL_MINUTES} minutes.\n\n\
         If you didn't create an account with us, please ignore this email.\n\n\
         Best regards,\nThe {BRAND} Team\n"
    )
}

pub fn verification_html(code: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Email Verification - {BRAND}</title></head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1>Welcome to {BRAND}!</h1>
    <p>Thank you for signing up. To complete your registration, enter the verification code below:</p>
    <div style="border: 2px dashed #3B82F6; padding: 20px; text-align: center; border-radius: 8px;">
      <span style="font-size: 28px; font-weight: bold; color: #3B82F6; letter-spacing: 4px;">{code}</span>
    </div>
    <p>This code will expire in {VERIFICATION_CODE_TTL_MINUTES} minutes.</p>
    <p>If you didn't create an account with us, please ignore this email.</p>
    <p>Best regards,<br>The {BRAND} Team</p>
  </div>
</body>
</html>"#
    )
}

pub fn plan_upgrade_subject(plan: &str) -> String {
    format!("Welcome to {plan} Plan - {BRAND}")
}

/// Features unlocked by a paid plan, listed in the upgrade email.
const PAID_FEATURES: &[&str] = &[
    "iOS app generation",
    "Desktop app generation",
    "Unlimited app conversions",
    "Priority support",
    "Advanced customization options",
];

pub fn plan_upgrade_text(plan: &str) -> String {
    let features: String = PAID_FEATURES.iter().map(|f| format!("  - {f}\n")).collect();
    format!(
        "Congratulations!\n\n\
         Your {BRAND} account has been upgraded to the {plan} plan.\n\n\
         You now have access to:\n{features}\n\
         Best regards,\nThe {BRAND} Team\n"
    )
}

pub fn plan_upgrade_html(plan: &str) -> String {
    let features: String = PAID_FEATURES
        .iter()
        .map(|f| format!("<li>{f}</li>"))
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Plan Upgraded - {BRAND}</title></head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1>Plan Upgraded Successfully!</h1>
    <p>Your {BRAND} account has been upgraded to:</p>
    <p style="text-align: center;"><strong style="text-transform: uppercase;">{plan} Plan</strong></p>
    <p>You now have access to:</p>
    <ul>{features}</ul>
    <p>Best regards,<br>The {BRAND} Team</p>
  </div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_text_mentions_expiry() {
        assert!(verification_text("000111").contains("expire in 15 minutes"));
    }

    #[test]
    fn upgrade_bodies_list_every_feature() {
        let text = plan_upgrade_text("pro");
        let html = plan_upgrade_html("pro");
        for feature in PAID_FEATURES {
            assert!(text.contains(feature));
            assert!(html.contains(feature));
        }
    }
}
