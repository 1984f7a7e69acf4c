//! MySQL repository implementations

mod profile_repository_impl;
mod verification_store_impl;

pub use profile_repository_impl::MySqlProfileRepository;
pub use verification_store_impl::{MySqlVerificationStore, MySqlVerificationTransaction};

use ss_core::errors::DomainError;

/// Translate a driver error into the retryable store failure
pub(crate) fn store_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |error| {
        tracing::error!(error = %error, context = context, "Database operation failed");
        DomainError::store(format!("{}: {}", context, error))
    }
}

/// Decode a column, reporting a schema mismatch as an internal error
pub(crate) fn column<'r, T>(row: &'r sqlx::mysql::MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    sqlx::Row::try_get(row, name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}
