//! Domain-specific error types for verification and validation
//!
//! Messages here are developer-facing. The presentation layer maps each variant
//! to a stable error code and a client-facing message.

use thiserror::Error;

/// Business-rule failures of the code verifier
///
/// All three map to the same HTTP status so callers cannot time or probe
/// whether an address has outstanding codes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    /// No request matches the address and code
    #[error("Invalid verification code")]
    InvalidCode,

    /// The matching request was already consumed or superseded
    #[error("Verification code already used")]
    AlreadyUsed,

    /// The matching request is past its expiry
    #[error("Verification code expired")]
    Expired,
}

/// Input validation errors
///
/// These are raised before any store access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Unknown value for {field}: {value}")]
    UnknownValue { field: String, value: String },

    #[error("Too short: {field} (min: {min})")]
    TooShort { field: String, min: usize },

    #[error("Email domain not allowed: {domain}")]
    DomainNotAllowed { domain: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        Self::RequiredField { field: field.into() }
    }

    pub fn unknown(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Name of the offending field, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::RequiredField { field }
            | Self::InvalidFormat { field }
            | Self::UnknownValue { field, .. }
            | Self::TooShort { field, .. } => Some(field),
            Self::DomainNotAllowed { .. } => Some("address"),
        }
    }
}
