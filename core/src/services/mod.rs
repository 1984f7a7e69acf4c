//! Business services containing domain logic and use cases.

pub mod registration;
pub mod verification;

// Re-export commonly used types
pub use registration::{RegisterProfileCommand, RegistrationReceipt, RegistrationService};
pub use verification::{
    IssueCodeCommand, MockBehavior, MockNotifier, NotifierTrait, SentCode, VerificationService,
    VerificationServiceConfig,
};
