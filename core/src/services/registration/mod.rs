//! Profile registration and lookup for students, faculty and alumni

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::RegistrationService;
pub use types::{RegisterProfileCommand, RegistrationReceipt, MIN_PASSWORD_LENGTH};
