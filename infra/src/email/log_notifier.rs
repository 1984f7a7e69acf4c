//! Notifier that writes codes to the log instead of sending them

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

use ss_core::domain::value_objects::Purpose;
use ss_core::services::NotifierTrait;
use ss_shared::email::mask_address;

/// Development notifier; never use in production
#[derive(Debug, Default)]
pub struct LogNotifier {
    sent: AtomicU64,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotifierTrait for LogNotifier {
    async fn send_code(
        &self,
        address: &str,
        code: &str,
        purpose: Purpose,
    ) -> Result<String, String> {
        let sequence = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            address = %mask_address(address),
            code = code,
            purpose = %purpose,
            event = "otp_logged",
            "Verification code (log notifier)"
        );
        Ok(format!("log-{}", sequence))
    }
}
