//! Shared utilities and common types for the StudySphere server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and layered loading
//! - Error and success response envelopes
//! - Email address helpers (normalization, domain policy, masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, DatabaseConfig, EmailConfig, Environment, LogFormat, LoggingConfig,
    NotifierProvider, RegistrationConfig, ServerConfig, SmtpConfig, SupersessionScope,
    VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, HealthResponse, ResponseStatus};
pub use utils::email;
