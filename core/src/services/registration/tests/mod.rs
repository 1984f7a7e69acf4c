//! Tests for profile registration

use std::sync::Arc;

use crate::domain::entities::{AcademicDegree, ProfileDetails};
use crate::domain::value_objects::{Purpose, RoleType};
use crate::errors::{DomainError, ValidationError};
use crate::repositories::{InMemoryStore, ProfileRepository};
use crate::services::registration::{RegisterProfileCommand, RegistrationService};
use crate::services::verification::{
    MockNotifier, VerificationService, VerificationServiceConfig,
};

// Minimum bcrypt cost keeps the tests fast
const TEST_HASH_COST: u32 = 4;

type TestRegistration = RegistrationService<InMemoryStore, InMemoryStore, MockNotifier>;
type TestVerification = VerificationService<InMemoryStore, MockNotifier>;

fn create_services(
    config: VerificationServiceConfig,
) -> (TestRegistration, Arc<TestVerification>, InMemoryStore) {
    let store = InMemoryStore::new();
    let shared = Arc::new(store.clone());
    let verification = Arc::new(VerificationService::new(
        shared.clone(),
        Arc::new(MockNotifier::delivering()),
        config,
    ));
    let registration = RegistrationService::new(shared, verification.clone(), TEST_HASH_COST);
    (registration, verification, store)
}

fn student_command(address: &str) -> RegisterProfileCommand {
    RegisterProfileCommand {
        full_name: "Ana Lopez".to_string(),
        address: address.to_string(),
        password: "s3cret-pass".to_string(),
        details: ProfileDetails::Student {
            control_number: "20030123".to_string(),
            current_program: "ISC".to_string(),
            other_program: None,
            semester: Some(6),
        },
        skills: Some("rust, sql".to_string()),
        interests: Some("  ".to_string()),
    }
}

#[tokio::test]
async fn test_register_links_signup_code_to_profile() {
    let (registration, verification, store) =
        create_services(VerificationServiceConfig::default());

    let receipt = registration
        .register(student_command("Ana@ITCelaya.edu.mx"))
        .await
        .unwrap();

    assert_eq!(receipt.id, 1);
    assert_eq!(receipt.role_type, RoleType::Student);
    assert_eq!(receipt.address, "ana@itcelaya.edu.mx");
    assert!(receipt.code_issued);

    let requests = store.requests_for("ana@itcelaya.edu.mx").await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].profile_id, Some(receipt.id));
    assert_eq!(requests[0].purpose, Purpose::Signup);
    assert_eq!(requests[0].role_type, RoleType::Student);

    let outcome = verification
        .verify_code("ana@itcelaya.edu.mx", &requests[0].code)
        .await
        .unwrap();
    assert!(outcome.profile_verified);

    let profile = registration.fetch(RoleType::Student, receipt.id).await.unwrap();
    assert!(profile.verified);
    assert_eq!(profile.skills.as_deref(), Some("rust, sql"));
    assert_eq!(profile.interests, None);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let (registration, _, _) = create_services(VerificationServiceConfig::default());

    registration
        .register(student_command("ana@itcelaya.edu.mx"))
        .await
        .unwrap();
    let result = registration
        .register(student_command("ANA@itcelaya.edu.mx"))
        .await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_same_address_allowed_in_other_role() {
    let (registration, _, _) = create_services(VerificationServiceConfig::default());

    registration
        .register(student_command("ana@itcelaya.edu.mx"))
        .await
        .unwrap();

    let faculty = RegisterProfileCommand {
        details: ProfileDetails::Faculty {
            degree_program: Some("ISC".to_string()),
            academic_degree: Some(AcademicDegree::Doctorate),
        },
        ..student_command("ana@itcelaya.edu.mx")
    };
    let receipt = registration.register(faculty).await.unwrap();
    assert_eq!(receipt.role_type, RoleType::Faculty);
    assert_eq!(receipt.id, 1);
}

#[tokio::test]
async fn test_register_validation() {
    let (registration, _, store) = create_services(VerificationServiceConfig::default());

    let blank_name = RegisterProfileCommand {
        full_name: " ".to_string(),
        ..student_command("ana@itcelaya.edu.mx")
    };
    assert!(matches!(
        registration.register(blank_name).await,
        Err(DomainError::Validation(ValidationError::RequiredField { .. }))
    ));

    assert!(matches!(
        registration.register(student_command("not-an-email")).await,
        Err(DomainError::Validation(ValidationError::InvalidFormat { .. }))
    ));

    let short_password = RegisterProfileCommand {
        password: "short".to_string(),
        ..student_command("ana@itcelaya.edu.mx")
    };
    assert!(matches!(
        registration.register(short_password).await,
        Err(DomainError::Validation(ValidationError::TooShort { .. }))
    ));

    let bad_year = RegisterProfileCommand {
        details: ProfileDetails::Alumnus {
            degree_program: "ISC".to_string(),
            graduation_year: 1800,
        },
        ..student_command("ana@itcelaya.edu.mx")
    };
    assert!(matches!(
        registration.register(bad_year).await,
        Err(DomainError::Validation(ValidationError::InvalidFormat { .. }))
    ));

    assert!(!store
        .exists_by_address(RoleType::Student, "ana@itcelaya.edu.mx")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_register_applies_domain_policy() {
    let config = VerificationServiceConfig {
        blocked_domains: vec!["gmail.com".to_string()],
        ..VerificationServiceConfig::default()
    };
    let (registration, _, store) = create_services(config);

    let result = registration.register(student_command("ana@gmail.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::DomainNotAllowed { .. }))
    ));
    assert!(!store
        .exists_by_address(RoleType::Student, "ana@gmail.com")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_fetch_unknown_profile() {
    let (registration, _, _) = create_services(VerificationServiceConfig::default());

    let result = registration.fetch(RoleType::Alumnus, 42).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}
