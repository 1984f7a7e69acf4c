//! Unit tests for domain error types

use crate::errors::{DomainError, ValidationError, VerificationError};

#[test]
fn test_verification_error_messages() {
    assert_eq!(VerificationError::InvalidCode.to_string(), "Invalid verification code");
    assert_eq!(VerificationError::AlreadyUsed.to_string(), "Verification code already used");
    assert_eq!(VerificationError::Expired.to_string(), "Verification code expired");
}

#[test]
fn test_validation_error_field() {
    assert_eq!(ValidationError::required("address").field(), Some("address"));
    assert_eq!(
        ValidationError::unknown("roleType", "teacher").field(),
        Some("roleType")
    );
    let domain = ValidationError::DomainNotAllowed {
        domain: "gmail.com".to_string(),
    };
    assert_eq!(domain.field(), Some("address"));
    assert!(domain.to_string().contains("gmail.com"));
}

#[test]
fn test_domain_error_conversion() {
    let error: DomainError = VerificationError::Expired.into();
    assert_eq!(error.as_verification(), Some(VerificationError::Expired));

    let error: DomainError = ValidationError::required("code").into();
    assert!(matches!(error, DomainError::Validation(_)));
    assert_eq!(error.as_verification(), None);
}

#[test]
fn test_store_error_display() {
    let error = DomainError::store("connection refused");
    assert_eq!(error.to_string(), "Store unavailable: connection refused");
}
