//! Configuration for the verification service

use std::time::Duration;

use ss_shared::{AppConfig, SupersessionScope};

use crate::domain::entities::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Deadline for a single delivery attempt
    pub delivery_timeout: Duration,
    /// Which earlier unused codes a new code invalidates
    pub supersession_scope: SupersessionScope,
    /// Role type used when a request omits it; empty makes it required
    pub default_role_type: String,
    /// Email domains admitted; empty admits all
    pub allowed_domains: Vec<String>,
    /// Email domains rejected
    pub blocked_domains: Vec<String>,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            delivery_timeout: Duration::from_secs(5),
            supersession_scope: SupersessionScope::Address,
            default_role_type: String::from("student"),
            allowed_domains: Vec::new(),
            blocked_domains: Vec::new(),
        }
    }
}

impl From<&AppConfig> for VerificationServiceConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            code_expiration_minutes: config.verification.code_ttl_minutes,
            delivery_timeout: Duration::from_millis(config.verification.delivery_timeout_ms),
            supersession_scope: config.verification.supersession_scope,
            default_role_type: config.verification.default_role_type.clone(),
            allowed_domains: config.email.allowed_domains.clone(),
            blocked_domains: config.email.blocked_domains.clone(),
        }
    }
}
