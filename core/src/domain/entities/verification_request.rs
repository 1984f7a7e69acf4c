//! Verification request entity for email-based account verification.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Purpose, RoleType};
use crate::errors::VerificationError;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (15 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// Lifecycle state derived from the stored flags at query time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    /// Unused and not yet expired
    Pending,
    /// Used by a successful verification
    Consumed,
    /// Used without verification, invalidated by a newer request
    Superseded,
    /// Unused but past its expiry
    Expired,
}

/// One issued code. Rows are never deleted; consumption and supersession both
/// flip `used`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Store-assigned identifier, monotonically increasing
    pub id: i64,

    /// Normalized (trimmed, lower-cased) email address
    pub address: String,

    /// The 6-digit verification code
    pub code: String,

    pub purpose: Purpose,

    /// Selects the profile table updated on success
    pub role_type: RoleType,

    /// Profile flagged as verified when this code is consumed
    pub profile_id: Option<i64>,

    /// Set once, by consumption or supersession
    pub used: bool,

    /// Set only by a successful verification
    pub verified: bool,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl VerificationRequest {
    /// Check the request can be consumed at `now`.
    ///
    /// Used is reported before expiry, matching the order callers observe.
    pub fn ensure_consumable(&self, now: DateTime<Utc>) -> Result<(), VerificationError> {
        match self.state_at(now) {
            RequestState::Pending => Ok(()),
            RequestState::Consumed | RequestState::Superseded => {
                Err(VerificationError::AlreadyUsed)
            }
            RequestState::Expired => Err(VerificationError::Expired),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Lifecycle state at `now`; a used request never reports `Expired`
    pub fn state_at(&self, now: DateTime<Utc>) -> RequestState {
        match (self.used, self.verified) {
            (true, true) => RequestState::Consumed,
            (true, false) => RequestState::Superseded,
            (false, _) if self.is_expired_at(now) => RequestState::Expired,
            (false, _) => RequestState::Pending,
        }
    }
}

/// Values for a request about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVerificationRequest {
    pub address: String,
    pub code: String,
    pub purpose: Purpose,
    pub role_type: RoleType,
    pub profile_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewVerificationRequest {
    /// Build a request with a fresh code expiring `ttl_minutes` after `now`
    pub fn generate(
        address: String,
        purpose: Purpose,
        role_type: RoleType,
        profile_id: Option<i64>,
        now: DateTime<Utc>,
        ttl_minutes: i64,
    ) -> Self {
        Self {
            address,
            code: generate_code(),
            purpose,
            role_type,
            profile_id,
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
        }
    }
}

/// Generate a zero-padded 6-digit code from the operating system CSPRNG
pub fn generate_code() -> String {
    let value: u32 = OsRng.gen_range(0..1_000_000);
    format!("{:0width$}", value, width = CODE_LENGTH)
}
