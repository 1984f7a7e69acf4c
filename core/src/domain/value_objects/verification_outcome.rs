//! Results handed back by the verification service

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Purpose, RoleType};

/// Acknowledgement of an issued code. The code itself is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReceipt {
    pub address: String,
    pub purpose: Purpose,
    pub expires_at: DateTime<Utc>,
}

/// Successful consumption of a code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOutcome {
    pub address: String,
    pub purpose: Purpose,
    pub role_type: RoleType,
    pub profile_id: Option<i64>,
    /// Whether a linked profile row was actually flagged as verified
    pub profile_verified: bool,
    pub verified_at: DateTime<Utc>,
}
