//! Domain entities representing core business objects.

pub mod profile;
pub mod verification_request;

pub use profile::{AcademicDegree, NewProfile, Profile, ProfileDetails};
pub use verification_request::{
    generate_code, NewVerificationRequest, RequestState, VerificationRequest, CODE_LENGTH,
    DEFAULT_EXPIRATION_MINUTES,
};
