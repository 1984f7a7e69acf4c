//! Email verification routes
//!
//! - `POST /email/request-code` issues a code and starts delivery
//! - `POST /email/verify-code` consumes a code and flags the linked profile

pub mod request_code;
pub mod verify_code;

pub use request_code::request_code;
pub use verify_code::verify_code;
