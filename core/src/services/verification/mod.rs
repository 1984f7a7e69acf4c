//! Verification service module for email-based account verification
//!
//! This module provides the one-time code workflow:
//! - Code generation, supersession and storage in one transaction
//! - Best-effort delivery through a [`NotifierTrait`] implementation
//! - Single-use consumption that flags the linked profile atomically

mod config;
mod mock;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use mock::{MockBehavior, MockNotifier, SentCode};
pub use service::VerificationService;
pub use traits::NotifierTrait;
pub use types::IssueCodeCommand;
