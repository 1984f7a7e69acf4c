use serde::{Deserialize, Serialize};
use validator::Validate;

use ss_core::{RoleType, VerificationOutcome};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequestCodeRequest {
    /// Institutional email address
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "address is required"))]
    pub address: String,

    /// `student`, `faculty` or `alumnus`; the configured default applies when absent
    #[serde(default)]
    pub role_type: Option<String>,

    /// Profile flagged as verified once the code is consumed
    #[serde(default)]
    pub profile_id: Option<i64>,

    /// `signup` (default), `login` or `reset`
    #[serde(default)]
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCodeResponse {
    pub address: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "address is required"))]
    pub address: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 16, message = "code is required"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeResponse {
    pub address: String,
    pub profile_id: Option<i64>,
    pub role_type: RoleType,
}

impl From<VerificationOutcome> for VerifyCodeResponse {
    fn from(outcome: VerificationOutcome) -> Self {
        Self {
            address: outcome.address,
            profile_id: outcome.profile_id,
            role_type: outcome.role_type,
        }
    }
}
