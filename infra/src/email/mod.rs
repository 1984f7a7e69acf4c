//! Email delivery of verification codes
//!
//! The backend is chosen by configuration: SMTP for real delivery or a log-only
//! notifier for development.

mod log_notifier;
mod smtp;

pub use log_notifier::LogNotifier;
pub use smtp::SmtpNotifier;

use async_trait::async_trait;

use ss_core::domain::value_objects::Purpose;
use ss_core::services::NotifierTrait;
use ss_shared::{EmailConfig, NotifierProvider};

use crate::InfrastructureError;

/// Notifier selected from [`EmailConfig::provider`]
pub enum ConfiguredNotifier {
    Smtp(SmtpNotifier),
    Log(LogNotifier),
}

impl ConfiguredNotifier {
    pub fn from_config(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        match config.provider {
            NotifierProvider::Smtp => {
                tracing::info!(host = %config.smtp.host, "Using SMTP email notifier");
                Ok(Self::Smtp(SmtpNotifier::new(&config.smtp, &config.subject)?))
            }
            NotifierProvider::Log => {
                tracing::warn!("Using log-only email notifier; codes are not delivered");
                Ok(Self::Log(LogNotifier::new()))
            }
        }
    }

    pub fn provider(&self) -> NotifierProvider {
        match self {
            Self::Smtp(_) => NotifierProvider::Smtp,
            Self::Log(_) => NotifierProvider::Log,
        }
    }
}

#[async_trait]
impl NotifierTrait for ConfiguredNotifier {
    async fn send_code(
        &self,
        address: &str,
        code: &str,
        purpose: Purpose,
    ) -> Result<String, String> {
        match self {
            Self::Smtp(notifier) => notifier.send_code(address, code, purpose).await,
            Self::Log(notifier) => notifier.send_code(address, code, purpose).await,
        }
    }
}

/// Plain-text body of a verification email
pub(crate) fn render_body(code: &str, purpose: Purpose) -> String {
    let action = match purpose {
        Purpose::Signup => "finish creating your account",
        Purpose::Login => "sign in",
        Purpose::Reset => "reset your password",
    };
    format!(
        "Your StudySphere verification code is {}.\n\n\
         Enter it to {}. The code expires in a few minutes and can be used once.\n\
         If you did not request it, you can ignore this message.",
        code, action
    )
}
