//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management
//! - Embedded schema migrations
//! - Transactional verification store and profile repository

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlProfileRepository, MySqlVerificationStore, MySqlVerificationTransaction};
