//! Trait for outbound code delivery

use async_trait::async_trait;

use crate::domain::value_objects::Purpose;

/// Trait for email delivery integration
#[async_trait]
pub trait NotifierTrait: Send + Sync {
    /// Deliver a verification code, returning a provider message id or a failure reason
    async fn send_code(&self, address: &str, code: &str, purpose: Purpose)
        -> Result<String, String>;
}
