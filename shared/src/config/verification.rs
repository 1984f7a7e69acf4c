//! Verification code and registration configuration

use serde::{Deserialize, Serialize};

/// Which earlier unused codes a newly issued code invalidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SupersessionScope {
    /// Every unused code for the address, regardless of purpose
    #[default]
    Address,
    /// Only unused codes for the same address and purpose
    AddressAndPurpose,
}

/// Email verification code settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes a freshly issued code stays valid
    #[serde(default = "default_code_ttl_minutes")]
    pub code_ttl_minutes: i64,

    /// Deadline for a single delivery attempt, in milliseconds
    #[serde(default = "default_delivery_timeout_ms")]
    pub delivery_timeout_ms: u64,

    /// Supersession policy applied when a new code is issued
    #[serde(default)]
    pub supersession_scope: SupersessionScope,

    /// Role type assumed when a request omits it; empty means the field is required
    #[serde(default = "default_role_type")]
    pub default_role_type: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: default_code_ttl_minutes(),
            delivery_timeout_ms: default_delivery_timeout_ms(),
            supersession_scope: SupersessionScope::default(),
            default_role_type: default_role_type(),
        }
    }
}

/// Profile registration settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrationConfig {
    /// bcrypt cost factor for password hashes
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            password_hash_cost: default_password_hash_cost(),
        }
    }
}

fn default_code_ttl_minutes() -> i64 {
    15
}

fn default_delivery_timeout_ms() -> u64 {
    5_000
}

fn default_role_type() -> String {
    String::from("student")
}

fn default_password_hash_cost() -> u32 {
    12
}
