//! In-memory verification store and profile repository
//!
//! Transactions take an owned async mutex guard for their whole lifetime, so at
//! most one transaction is open at a time. Changes are applied to a working copy
//! and written back on commit; dropping the transaction discards them.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::entities::{
    NewProfile, NewVerificationRequest, Profile, ProfileDetails, VerificationRequest,
};
use crate::domain::value_objects::{Purpose, RoleType};
use crate::errors::{DomainError, DomainResult, VerificationError};

use super::profile::ProfileRepository;
use super::verification::{VerificationStore, VerificationTransaction};

#[derive(Debug, Clone)]
struct StoredProfile {
    profile: Profile,
    // Kept so the store mirrors the relational schema; never returned
    #[allow(dead_code)]
    password_hash: String,
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    requests: Vec<VerificationRequest>,
    next_request_id: i64,
    profiles: HashMap<RoleType, BTreeMap<i64, StoredProfile>>,
    next_profile_ids: HashMap<RoleType, i64>,
    // Times each address lock was taken by a committed transaction
    address_locks: HashMap<String, u64>,
}

impl MemoryState {
    fn allocate_profile_id(&mut self, role_type: RoleType) -> i64 {
        let next = self.next_profile_ids.entry(role_type).or_insert(0);
        *next += 1;
        *next
    }
}

#[derive(Debug, Default)]
struct FailureFlags {
    unavailable: AtomicBool,
    fail_profile_updates: AtomicBool,
}

impl FailureFlags {
    fn check_available(&self) -> DomainResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(DomainError::store("in-memory store marked unavailable"))
        } else {
            Ok(())
        }
    }
}

/// Store holding verification requests and profiles in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
    flags: Arc<FailureFlags>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail with `StoreUnavailable`
    pub fn set_unavailable(&self, unavailable: bool) {
        self.flags.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make profile flag updates inside transactions fail with `StoreUnavailable`
    pub fn set_fail_profile_updates(&self, fail: bool) {
        self.flags.fail_profile_updates.store(fail, Ordering::SeqCst);
    }

    /// Insert a minimal unverified profile under a fixed id and address
    pub async fn seed_profile(&self, role_type: RoleType, id: i64, address: &str) -> Profile {
        let details = match role_type {
            RoleType::Student => ProfileDetails::Student {
                control_number: format!("{:08}", id),
                current_program: String::from("ISC"),
                other_program: None,
                semester: Some(1),
            },
            RoleType::Faculty => ProfileDetails::Faculty {
                degree_program: None,
                academic_degree: None,
            },
            RoleType::Alumnus => ProfileDetails::Alumnus {
                degree_program: String::from("ISC"),
                graduation_year: 2020,
            },
        };
        let profile = Profile {
            id,
            full_name: format!("Seeded {} {}", role_type, id),
            address: address.to_string(),
            details,
            skills: None,
            interests: None,
            verified: false,
            verified_at: None,
            created_at: Utc::now(),
        };

        let mut state = self.state.lock().await;
        let next = state.next_profile_ids.entry(role_type).or_insert(0);
        *next = (*next).max(id);
        state.profiles.entry(role_type).or_default().insert(
            id,
            StoredProfile {
                profile: profile.clone(),
                password_hash: String::new(),
            },
        );
        profile
    }

    /// Snapshot of every request for an address, oldest first
    pub async fn requests_for(&self, address: &str) -> Vec<VerificationRequest> {
        let state = self.state.lock().await;
        state
            .requests
            .iter()
            .filter(|request| request.address.eq_ignore_ascii_case(address))
            .cloned()
            .collect()
    }

    /// Number of committed transactions that took the issue lock for an address
    pub async fn address_lock_count(&self, address: &str) -> u64 {
        let state = self.state.lock().await;
        state
            .address_locks
            .get(&address.to_ascii_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Move the expiry of every request for an address into the past
    pub async fn expire_requests_for(&self, address: &str) {
        let past = Utc::now() - Duration::seconds(1);
        let mut state = self.state.lock().await;
        for request in state
            .requests
            .iter_mut()
            .filter(|request| request.address.eq_ignore_ascii_case(address))
        {
            request.expires_at = past;
        }
    }
}

/// Open transaction over an [`InMemoryStore`]
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
    flags: Arc<FailureFlags>,
}

#[async_trait]
impl VerificationStore for InMemoryStore {
    type Tx = InMemoryTransaction;

    async fn begin(&self) -> DomainResult<Self::Tx> {
        self.flags.check_available()?;
        let guard = self.state.clone().lock_owned().await;
        let working = (*guard).clone();
        Ok(InMemoryTransaction {
            guard,
            working,
            flags: self.flags.clone(),
        })
    }

    async fn find_by_address(&self, address: &str) -> DomainResult<Vec<VerificationRequest>> {
        self.flags.check_available()?;
        Ok(self.requests_for(address).await)
    }
}

#[async_trait]
impl VerificationTransaction for InMemoryTransaction {
    // The mutex guard already serializes transactions; only the count is kept
    async fn lock_address(&mut self, address: &str) -> DomainResult<()> {
        self.flags.check_available()?;
        *self
            .working
            .address_locks
            .entry(address.to_ascii_lowercase())
            .or_insert(0) += 1;
        Ok(())
    }

    async fn supersede_unused(
        &mut self,
        address: &str,
        purpose: Option<Purpose>,
    ) -> DomainResult<u64> {
        self.flags.check_available()?;
        let mut superseded = 0;
        for request in self.working.requests.iter_mut().filter(|request| {
            !request.used
                && request.address.eq_ignore_ascii_case(address)
                && purpose.map_or(true, |purpose| request.purpose == purpose)
        }) {
            request.used = true;
            superseded += 1;
        }
        Ok(superseded)
    }

    async fn insert(
        &mut self,
        request: NewVerificationRequest,
    ) -> DomainResult<VerificationRequest> {
        self.flags.check_available()?;
        self.working.next_request_id += 1;
        let stored = VerificationRequest {
            id: self.working.next_request_id,
            address: request.address,
            code: request.code,
            purpose: request.purpose,
            role_type: request.role_type,
            profile_id: request.profile_id,
            used: false,
            verified: false,
            created_at: request.created_at,
            expires_at: request.expires_at,
        };
        self.working.requests.push(stored.clone());
        Ok(stored)
    }

    async fn lock_latest(
        &mut self,
        address: &str,
        code: &str,
    ) -> DomainResult<Option<VerificationRequest>> {
        self.flags.check_available()?;
        Ok(self
            .working
            .requests
            .iter()
            .filter(|request| request.address.eq_ignore_ascii_case(address) && request.code == code)
            .max_by_key(|request| request.id)
            .cloned())
    }

    async fn mark_consumed(&mut self, id: i64) -> DomainResult<()> {
        self.flags.check_available()?;
        match self
            .working
            .requests
            .iter_mut()
            .find(|request| request.id == id && !request.used)
        {
            Some(request) => {
                request.used = true;
                request.verified = true;
                Ok(())
            }
            None => Err(VerificationError::AlreadyUsed.into()),
        }
    }

    async fn mark_profile_verified(
        &mut self,
        role_type: RoleType,
        profile_id: i64,
        address: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<bool> {
        self.flags.check_available()?;
        if self.flags.fail_profile_updates.load(Ordering::SeqCst) {
            return Err(DomainError::store("profile update failed"));
        }

        match self
            .working
            .profiles
            .get_mut(&role_type)
            .and_then(|profiles| profiles.get_mut(&profile_id))
            .filter(|stored| stored.profile.address.eq_ignore_ascii_case(address))
        {
            Some(stored) => {
                stored.profile.verified = true;
                stored.profile.verified_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn commit(mut self) -> DomainResult<()> {
        self.flags.check_available()?;
        *self.guard = std::mem::take(&mut self.working);
        Ok(())
    }

    async fn rollback(self) -> DomainResult<()> {
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_by_id(&self, role_type: RoleType, id: i64) -> DomainResult<Option<Profile>> {
        self.flags.check_available()?;
        let state = self.state.lock().await;
        Ok(state
            .profiles
            .get(&role_type)
            .and_then(|profiles| profiles.get(&id))
            .map(|stored| stored.profile.clone()))
    }

    async fn exists_by_address(&self, role_type: RoleType, address: &str) -> DomainResult<bool> {
        self.flags.check_available()?;
        let state = self.state.lock().await;
        Ok(state.profiles.get(&role_type).map_or(false, |profiles| {
            profiles
                .values()
                .any(|stored| stored.profile.address.eq_ignore_ascii_case(address))
        }))
    }

    async fn create(&self, new_profile: NewProfile) -> DomainResult<Profile> {
        self.flags.check_available()?;
        let role_type = new_profile.role_type();
        let mut state = self.state.lock().await;

        let duplicate = state.profiles.get(&role_type).map_or(false, |profiles| {
            profiles
                .values()
                .any(|stored| stored.profile.address.eq_ignore_ascii_case(&new_profile.address))
        });
        if duplicate {
            return Err(DomainError::Conflict {
                message: format!("{} address already registered", role_type),
            });
        }

        let id = state.allocate_profile_id(role_type);
        let profile = Profile {
            id,
            full_name: new_profile.full_name,
            address: new_profile.address,
            details: new_profile.details,
            skills: new_profile.skills,
            interests: new_profile.interests,
            verified: false,
            verified_at: None,
            created_at: Utc::now(),
        };
        state.profiles.entry(role_type).or_default().insert(
            id,
            StoredProfile {
                profile: profile.clone(),
                password_hash: new_profile.password_hash,
            },
        );
        Ok(profile)
    }
}
