//! Registration service creating profiles and linking them to a signup code

use std::sync::Arc;

use ss_shared::email::{is_valid_email, mask_address, normalize_address};

use crate::domain::entities::{NewProfile, Profile};
use crate::domain::value_objects::{Purpose, RoleType};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{ProfileRepository, VerificationStore};
use crate::services::verification::{IssueCodeCommand, NotifierTrait, VerificationService};

use super::types::{RegisterProfileCommand, RegistrationReceipt, MIN_PASSWORD_LENGTH};

/// Registration service for student, faculty and alumnus profiles
pub struct RegistrationService<P, S, N>
where
    P: ProfileRepository,
    S: VerificationStore,
    N: NotifierTrait + 'static,
{
    profiles: Arc<P>,
    verification: Arc<VerificationService<S, N>>,
    /// bcrypt cost factor
    password_hash_cost: u32,
}

impl<P, S, N> RegistrationService<P, S, N>
where
    P: ProfileRepository,
    S: VerificationStore,
    N: NotifierTrait + 'static,
{
    pub fn new(
        profiles: Arc<P>,
        verification: Arc<VerificationService<S, N>>,
        password_hash_cost: u32,
    ) -> Self {
        Self {
            profiles,
            verification,
            password_hash_cost,
        }
    }

    /// Register a profile and issue a signup code linked to it
    ///
    /// A failure to issue the code is logged and reported through
    /// `RegistrationReceipt::code_issued`; the profile is kept so the owner can
    /// request a new code.
    ///
    /// # Returns
    ///
    /// * `Ok(RegistrationReceipt)` - The new profile id
    /// * `Err(DomainError::Validation)` - Missing or malformed fields
    /// * `Err(DomainError::Conflict)` - The address is already registered for the role
    pub async fn register(&self, command: RegisterProfileCommand) -> DomainResult<RegistrationReceipt> {
        let role_type = command.role_type();
        let address = normalize_address(&command.address);

        if command.full_name.trim().is_empty() {
            return Err(ValidationError::required("fullName").into());
        }
        if address.is_empty() {
            return Err(ValidationError::required("address").into());
        }
        if !is_valid_email(&address) {
            return Err(ValidationError::InvalidFormat {
                field: "address".to_string(),
            }
            .into());
        }
        if command.password.is_empty() {
            return Err(ValidationError::required("password").into());
        }
        if command.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::TooShort {
                field: "password".to_string(),
                min: MIN_PASSWORD_LENGTH,
            }
            .into());
        }
        command.details.validate()?;
        self.verification.check_domain(&address)?;

        if self.profiles.exists_by_address(role_type, &address).await? {
            return Err(DomainError::Conflict {
                message: format!("{} address already registered", role_type),
            });
        }

        let password_hash = self.hash_password(command.password).await?;

        let profile = self
            .profiles
            .create(NewProfile {
                full_name: command.full_name.trim().to_string(),
                address: address.clone(),
                password_hash,
                details: command.details,
                skills: non_blank(command.skills),
                interests: non_blank(command.interests),
            })
            .await?;

        tracing::info!(
            address = %mask_address(&address),
            role_type = %role_type,
            profile_id = profile.id,
            event = "profile_registered",
            "Registered profile"
        );

        let issue = IssueCodeCommand {
            address: address.clone(),
            role_type: Some(role_type.as_str().to_string()),
            profile_id: Some(profile.id),
            purpose: Some(Purpose::Signup.as_str().to_string()),
        };
        let code_issued = match self.verification.issue_code(issue).await {
            Ok(_) => true,
            Err(error) => {
                tracing::warn!(
                    address = %mask_address(&address),
                    profile_id = profile.id,
                    error = %error,
                    event = "signup_code_failed",
                    "Profile registered but the signup code was not issued"
                );
                false
            }
        };

        Ok(RegistrationReceipt {
            id: profile.id,
            role_type,
            address,
            code_issued,
        })
    }

    /// Fetch a profile by role and id
    pub async fn fetch(&self, role_type: RoleType, id: i64) -> DomainResult<Profile> {
        self.profiles
            .find_by_id(role_type, id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("{} {}", role_type, id),
            })
    }

    async fn hash_password(&self, password: String) -> DomainResult<String> {
        let cost = self.password_hash_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
