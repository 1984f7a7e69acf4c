//! Repository interfaces and the in-memory store backing tests and local runs.

mod memory;
mod profile;
mod verification;

pub use memory::{InMemoryStore, InMemoryTransaction};
pub use profile::ProfileRepository;
pub use verification::{VerificationStore, VerificationTransaction};
