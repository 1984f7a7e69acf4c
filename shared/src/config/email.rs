//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// Delivery backend used for verification emails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotifierProvider {
    /// Real delivery over SMTP
    Smtp,
    /// Log the code instead of sending it (development)
    #[default]
    Log,
}

/// SMTP relay settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// Relay host name
    pub host: String,

    /// Relay port
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// Login user
    #[serde(default)]
    pub username: String,

    /// Login password
    #[serde(default)]
    pub password: String,

    /// Sender mailbox; falls back to the username when empty
    #[serde(default)]
    pub from: String,

    /// Upgrade the connection with STARTTLS
    #[serde(default = "default_starttls")]
    pub starttls: bool,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("smtp.gmail.com"),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from: String::new(),
            starttls: default_starttls(),
        }
    }
}

impl SmtpConfig {
    /// Whether login credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Effective sender mailbox
    pub fn sender(&self) -> &str {
        if self.from.is_empty() {
            &self.username
        } else {
            &self.from
        }
    }
}

/// Email configuration: delivery backend plus institutional domain policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Delivery backend
    #[serde(default)]
    pub provider: NotifierProvider,

    /// SMTP relay settings (used when provider is `smtp`)
    #[serde(default)]
    pub smtp: SmtpConfig,

    /// Subject line of verification emails
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Only these domains may request codes (empty = any)
    #[serde(default)]
    pub allowed_domains: Vec<String>,

    /// These domains may never request codes
    #[serde(default)]
    pub blocked_domains: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: NotifierProvider::default(),
            smtp: SmtpConfig::default(),
            subject: default_subject(),
            allowed_domains: Vec::new(),
            blocked_domains: Vec::new(),
        }
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_starttls() -> bool {
    true
}

fn default_subject() -> String {
    String::from("StudySphere verification code")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_falls_back_to_username() {
        let mut smtp = SmtpConfig {
            username: "noreply@studysphere.edu".to_string(),
            ..Default::default()
        };
        assert_eq!(smtp.sender(), "noreply@studysphere.edu");

        smtp.from = "StudySphere <hello@studysphere.edu>".to_string();
        assert_eq!(smtp.sender(), "StudySphere <hello@studysphere.edu>");
    }

    #[test]
    fn test_credentials_required_for_smtp() {
        assert!(!SmtpConfig::default().has_credentials());
    }
}
