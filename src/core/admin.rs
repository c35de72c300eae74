//! Password-gated admin mode.

use crate::core::config::Config;

/// Outcome of an admin password attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCheck {
    Enabled,
    Rejected,
    /// No admin password configured.
    Unavailable,
}

impl AdminCheck {
    /// Notice shown to the user after the attempt.
    pub fn notice(self) -> &'static str {
        match self {
            AdminCheck::Enabled => "✅ Admin mode enabled",
            AdminCheck::Rejected => "❌ Incorrect password, running in user mode",
            AdminCheck::Unavailable => "Admin mode is not configured",
        }
    }
}

/// Check a password attempt against the configured admin password.
pub fn verify(config: &Config, attempt: &str) -> AdminCheck {
    verify_against(config.admin_pass.as_deref(), attempt)
}

fn verify_against(expected: Option<&str>, attempt: &str) -> AdminCheck {
    match expected {
        None => AdminCheck::Unavailable,
        Some(expected) if !attempt.is_empty() && attempt == expected => AdminCheck::Enabled,
        Some(_) => AdminCheck::Rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_password_enables() {
        assert_eq!(verify_against(Some("s3cret"), "s3cret"), AdminCheck::Enabled);
    }

    #[test]
    fn wrong_password_rejected() {
        assert_eq!(verify_against(Some("s3cret"), "guess"), AdminCheck::Rejected);
        assert_eq!(verify_against(Some("s3cret"), ""), AdminCheck::Rejected);
    }

    #[test]
    fn no_password_configured() {
        assert_eq!(verify_against(None, "anything"), AdminCheck::Unavailable);
    }

    #[test]
    fn verify_reads_config() {
        let mut config = crate::core::config::from_lookup(|name| {
            (name == crate::core::config::API_KEY_VAR).then(|| "sk-test".to_string())
        })
        .unwrap();
        assert_eq!(verify(&config, "x"), AdminCheck::Unavailable);
        config.admin_pass = Some("x".to_string());
        assert_eq!(verify(&config, "x"), AdminCheck::Enabled);
    }
}
