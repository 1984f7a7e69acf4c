//! SMTP notifier built on lettre's async transport

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use ss_core::domain::value_objects::Purpose;
use ss_core::services::NotifierTrait;
use ss_shared::email::mask_address;
use ss_shared::SmtpConfig;

use super::render_body;
use crate::InfrastructureError;

/// Sends verification codes through an SMTP relay
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    subject: String,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig, subject: &str) -> Result<Self, InfrastructureError> {
        if !config.has_credentials() {
            return Err(InfrastructureError::Config(
                "SMTP username and password are required".to_string(),
            ));
        }

        let from: Mailbox = config
            .sender()
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid sender address: {}", e)))?;

        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| InfrastructureError::Email(format!("Invalid SMTP relay: {}", e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from,
            subject: subject.to_string(),
        })
    }

    fn build_message(&self, address: &str, code: &str, purpose: Purpose) -> Result<Message, String> {
        let to: Mailbox = address
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(render_body(code, purpose))
            .map_err(|e| format!("Failed to build email: {}", e))
    }
}

#[async_trait]
impl NotifierTrait for SmtpNotifier {
    async fn send_code(
        &self,
        address: &str,
        code: &str,
        purpose: Purpose,
    ) -> Result<String, String> {
        let message = self.build_message(address, code, purpose)?;

        let response = self.transport.send(message).await.map_err(|e| {
            tracing::error!(
                address = %mask_address(address),
                error = %e,
                "SMTP delivery failed"
            );
            format!("SMTP delivery failed: {}", e)
        })?;

        Ok(response.message().collect::<Vec<_>>().join(" "))
    }
}
