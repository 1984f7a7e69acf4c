//! Profile repository trait for the three role-specific profile tables.

use async_trait::async_trait;

use crate::domain::entities::{NewProfile, Profile};
use crate::domain::value_objects::RoleType;
use crate::errors::DomainResult;

/// Repository trait for profile persistence operations
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a profile by role and id
    ///
    /// # Returns
    /// * `Ok(Some(Profile))` - Profile found
    /// * `Ok(None)` - No profile with that id for the role
    async fn find_by_id(&self, role_type: RoleType, id: i64) -> DomainResult<Option<Profile>>;

    /// Check whether a profile of the role already uses the address
    async fn exists_by_address(&self, role_type: RoleType, address: &str) -> DomainResult<bool>;

    /// Insert a new profile, unverified
    ///
    /// Fails with `DomainError::Conflict` when the address is already registered
    /// for the role.
    async fn create(&self, profile: NewProfile) -> DomainResult<Profile>;
}
