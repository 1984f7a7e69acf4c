//! Verification store traits defining transactional access to verification requests.
//!
//! Every multi-step operation of the issuer and the verifier runs against one
//! [`VerificationTransaction`]. Dropping a transaction without committing it
//! discards its changes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{NewVerificationRequest, VerificationRequest};
use crate::domain::value_objects::{Purpose, RoleType};
use crate::errors::DomainResult;

/// Handle to the persisted verification requests
#[async_trait]
pub trait VerificationStore: Send + Sync {
    type Tx: VerificationTransaction;

    /// Open a transaction
    async fn begin(&self) -> DomainResult<Self::Tx>;

    /// All requests for a normalized address, oldest first
    ///
    /// History read for auditing, outside any transaction. The issue and
    /// verify flows never call it; they only go through [`VerificationTransaction`].
    async fn find_by_address(&self, address: &str) -> DomainResult<Vec<VerificationRequest>>;
}

/// Unit of work over verification requests and the profile verified flag
#[async_trait]
pub trait VerificationTransaction: Send {
    /// Take the per-address issue lock, held until commit or rollback
    ///
    /// Two transactions issuing for the same address run one after the other,
    /// so at most one unused request per address survives.
    async fn lock_address(&mut self, address: &str) -> DomainResult<()>;

    /// Mark every unused request for the address as used.
    ///
    /// With `purpose` set, only requests of that purpose are touched.
    /// Returns the number of requests superseded.
    async fn supersede_unused(&mut self, address: &str, purpose: Option<Purpose>)
        -> DomainResult<u64>;

    /// Persist a new unused request and return it with its assigned id
    async fn insert(&mut self, request: NewVerificationRequest)
        -> DomainResult<VerificationRequest>;

    /// Lock and return the newest request matching the address and exact code
    async fn lock_latest(&mut self, address: &str, code: &str)
        -> DomainResult<Option<VerificationRequest>>;

    /// Set `used` and `verified` on a request that is still unused
    ///
    /// # Returns
    /// * `Err(DomainError::Verification(AlreadyUsed))` - The request was consumed concurrently
    async fn mark_consumed(&mut self, id: i64) -> DomainResult<()>;

    /// Flag a profile as verified at `at`
    ///
    /// Only a profile registered under `address` is flagged.
    ///
    /// # Returns
    /// * `Ok(true)` - The profile row was updated
    /// * `Ok(false)` - No profile with that id and address exists for the role
    async fn mark_profile_verified(
        &mut self,
        role_type: RoleType,
        profile_id: i64,
        address: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<bool>;

    async fn commit(self) -> DomainResult<()>;

    async fn rollback(self) -> DomainResult<()>;
}
