//! Main verification service implementation

use chrono::Utc;
use std::sync::Arc;

use ss_shared::email::{domain_permitted, email_domain, mask_address, normalize_address};
use ss_shared::SupersessionScope;

use crate::domain::entities::{NewVerificationRequest, RequestState};
use crate::domain::value_objects::{IssueReceipt, Purpose, RoleType, VerificationOutcome};
use crate::errors::{DomainError, DomainResult, ValidationError, VerificationError};
use crate::repositories::{VerificationStore, VerificationTransaction};

use super::config::VerificationServiceConfig;
use super::traits::NotifierTrait;
use super::types::IssueCodeCommand;

/// Verification service issuing and consuming one-time email codes
pub struct VerificationService<S: VerificationStore, N: NotifierTrait> {
    /// Persisted verification requests
    store: Arc<S>,
    /// Outbound delivery, invoked on a detached task
    notifier: Arc<N>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<S, N> VerificationService<S, N>
where
    S: VerificationStore,
    N: NotifierTrait + 'static,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>, config: VerificationServiceConfig) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a new code for an address
    ///
    /// This method:
    /// 1. Validates the address, role type and purpose
    /// 2. Takes the address lock, supersedes earlier unused codes and stores the
    ///    new one in one transaction
    /// 3. Starts delivery on a detached task bounded by the delivery timeout
    ///
    /// Delivery failures are logged and never reported to the caller.
    ///
    /// # Returns
    ///
    /// * `Ok(IssueReceipt)` - The normalized address and the code expiry
    /// * `Err(DomainError::Validation)` - If an input is missing or unknown
    /// * `Err(DomainError::StoreUnavailable)` - If the store fails
    pub async fn issue_code(&self, command: IssueCodeCommand) -> DomainResult<IssueReceipt> {
        let address = normalize_address(&command.address);
        if address.is_empty() {
            return Err(ValidationError::required("address").into());
        }
        self.check_domain(&address)?;

        let role_type =
            RoleType::resolve(command.role_type.as_deref(), &self.config.default_role_type)?;
        let purpose = Purpose::resolve(command.purpose.as_deref())?;
        if matches!(command.profile_id, Some(id) if id <= 0) {
            return Err(ValidationError::InvalidFormat {
                field: "profileId".to_string(),
            }
            .into());
        }

        let now = Utc::now();
        let new_request = NewVerificationRequest::generate(
            address.clone(),
            purpose,
            role_type,
            command.profile_id,
            now,
            self.config.code_expiration_minutes,
        );

        let scope = match self.config.supersession_scope {
            SupersessionScope::Address => None,
            SupersessionScope::AddressAndPurpose => Some(purpose),
        };

        let mut tx = self.store.begin().await?;
        tx.lock_address(&address).await?;
        let superseded = tx.supersede_unused(&address, scope).await?;
        let request = tx.insert(new_request).await?;
        tx.commit().await?;

        tracing::info!(
            address = %mask_address(&address),
            request_id = request.id,
            purpose = %purpose,
            role_type = %role_type,
            superseded = superseded,
            event = "otp_generated",
            "Issued verification code"
        );

        self.dispatch_delivery(request.address.clone(), request.code, purpose);

        Ok(IssueReceipt {
            address: request.address,
            purpose,
            expires_at: request.expires_at,
        })
    }

    /// Verify a code and flag the linked profile, all in one transaction
    ///
    /// The profile is flagged only when it is registered under the address the
    /// code was issued for.
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationOutcome)` - The code was consumed
    /// * `Err(DomainError::Verification)` - Invalid, used or expired code
    /// * `Err(DomainError::StoreUnavailable)` - If the store fails; nothing is changed
    pub async fn verify_code(&self, address: &str, code: &str) -> DomainResult<VerificationOutcome> {
        let address = normalize_address(address);
        let code = code.trim();
        if address.is_empty() {
            return Err(ValidationError::required("address").into());
        }
        if code.is_empty() {
            return Err(ValidationError::required("code").into());
        }

        let mut tx = self.store.begin().await?;

        let request = match tx.lock_latest(&address, code).await? {
            Some(request) => request,
            None => {
                return Err(abort(tx, &address, None, VerificationError::InvalidCode).await)
            }
        };

        let now = Utc::now();
        if let Err(reason) = request.ensure_consumable(now) {
            let state = request.state_at(now);
            return Err(abort(tx, &address, Some(state), reason).await);
        }

        tx.mark_consumed(request.id).await?;

        let mut profile_verified = false;
        if let Some(profile_id) = request.profile_id {
            profile_verified = tx
                .mark_profile_verified(request.role_type, profile_id, &request.address, now)
                .await?;
            if !profile_verified {
                tracing::warn!(
                    address = %mask_address(&address),
                    role_type = %request.role_type,
                    profile_id = profile_id,
                    event = "profile_missing",
                    "Verified code references a missing profile or one registered to another address"
                );
            }
        }

        tx.commit().await?;

        tracing::info!(
            address = %mask_address(&address),
            request_id = request.id,
            profile_verified = profile_verified,
            event = "otp_verified",
            "Verification code consumed"
        );

        Ok(VerificationOutcome {
            address,
            purpose: request.purpose,
            role_type: request.role_type,
            profile_id: request.profile_id,
            profile_verified,
            verified_at: now,
        })
    }

    /// Apply the configured email-domain policy to a normalized address
    pub fn check_domain(&self, address: &str) -> DomainResult<()> {
        if domain_permitted(
            address,
            &self.config.allowed_domains,
            &self.config.blocked_domains,
        ) {
            return Ok(());
        }

        let domain = email_domain(address).unwrap_or_default();
        tracing::warn!(
            domain = %domain,
            event = "domain_rejected",
            "Email domain rejected by policy"
        );
        Err(ValidationError::DomainNotAllowed { domain }.into())
    }

    fn dispatch_delivery(&self, address: String, code: String, purpose: Purpose) {
        let notifier = Arc::clone(&self.notifier);
        let deadline = self.config.delivery_timeout;

        tokio::spawn(async move {
            let masked = mask_address(&address);
            match tokio::time::timeout(deadline, notifier.send_code(&address, &code, purpose)).await
            {
                Ok(Ok(message_id)) => tracing::info!(
                    address = %masked,
                    message_id = %message_id,
                    event = "otp_delivered",
                    "Verification code delivered"
                ),
                Ok(Err(reason)) => tracing::warn!(
                    address = %masked,
                    reason = %reason,
                    event = "otp_delivery_failed",
                    "Verification code delivery failed"
                ),
                Err(_) => tracing::warn!(
                    address = %masked,
                    timeout_ms = deadline.as_millis() as u64,
                    event = "otp_delivery_timeout",
                    "Verification code delivery timed out"
                ),
            }
        });
    }
}

/// Roll back a transaction after a business failure and return the failure
async fn abort<T: VerificationTransaction>(
    tx: T,
    address: &str,
    state: Option<RequestState>,
    reason: VerificationError,
) -> DomainError {
    if let Err(error) = tx.rollback().await {
        tracing::warn!(error = %error, "Rollback after failed verification did not complete");
    }
    tracing::info!(
        address = %mask_address(address),
        reason = %reason,
        state = ?state,
        event = "otp_rejected",
        "Verification code rejected"
    );
    reason.into()
}
