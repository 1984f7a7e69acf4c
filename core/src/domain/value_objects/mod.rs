//! Value objects representing immutable domain concepts.

pub mod purpose;
pub mod role_type;
pub mod verification_outcome;

pub use purpose::Purpose;
pub use role_type::RoleType;
pub use verification_outcome::{IssueReceipt, VerificationOutcome};
