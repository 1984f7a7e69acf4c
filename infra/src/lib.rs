//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the StudySphere backend,
//! following Clean Architecture principles. It provides concrete implementations
//! of the core repository and notifier traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL pool, embedded migrations and repositories using SQLx
//! - **Email**: SMTP delivery through lettre and a log-only notifier
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email module - verification code delivery
pub mod email;

#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlProfileRepository, MySqlVerificationStore};
pub use email::{ConfiguredNotifier, LogNotifier, SmtpNotifier};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email transport error
    #[error("Email error: {0}")]
    Email(String),
}
