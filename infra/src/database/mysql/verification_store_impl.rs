//! MySQL implementation of the verification store.
//!
//! Each transaction owns a pooled connection for its lifetime. Dropping an
//! uncommitted [`MySqlVerificationTransaction`] rolls it back.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Transaction};

use ss_core::domain::entities::{NewVerificationRequest, VerificationRequest};
use ss_core::domain::value_objects::{Purpose, RoleType};
use ss_core::errors::{DomainError, DomainResult, VerificationError};
use ss_core::repositories::{VerificationStore, VerificationTransaction};

use super::{column, store_error};

const SELECT_COLUMNS: &str = "id, address, code, purpose, role_type, profile_id, is_used, \
                              verified, created_at, expires_at";

/// MySQL implementation of VerificationStore
#[derive(Clone)]
pub struct MySqlVerificationStore {
    pool: MySqlPool,
}

impl MySqlVerificationStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: &MySqlRow) -> Result<VerificationRequest, DomainError> {
        let purpose: String = column(row, "purpose")?;
        let role_type: String = column(row, "role_type")?;

        Ok(VerificationRequest {
            id: column(row, "id")?,
            address: column(row, "address")?,
            code: column(row, "code")?,
            purpose: purpose
                .parse::<Purpose>()
                .map_err(|e| DomainError::internal(format!("Stored purpose is invalid: {}", e)))?,
            role_type: role_type
                .parse::<RoleType>()
                .map_err(|e| DomainError::internal(format!("Stored role type is invalid: {}", e)))?,
            profile_id: column(row, "profile_id")?,
            used: column(row, "is_used")?,
            verified: column(row, "verified")?,
            created_at: column(row, "created_at")?,
            expires_at: column(row, "expires_at")?,
        })
    }
}

/// Open MySQL transaction over verification requests and profile tables
pub struct MySqlVerificationTransaction {
    tx: Transaction<'static, MySql>,
}

#[async_trait]
impl VerificationStore for MySqlVerificationStore {
    type Tx = MySqlVerificationTransaction;

    async fn begin(&self) -> DomainResult<Self::Tx> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(store_error("Failed to begin transaction"))?;
        Ok(MySqlVerificationTransaction { tx })
    }

    async fn find_by_address(&self, address: &str) -> DomainResult<Vec<VerificationRequest>> {
        let query = format!(
            "SELECT {} FROM email_verifications WHERE address = ? ORDER BY id ASC",
            SELECT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(address)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error("Failed to list verification requests"))?;

        rows.iter().map(Self::row_to_request).collect()
    }
}

#[async_trait]
impl VerificationTransaction for MySqlVerificationTransaction {
    // The row lock is taken before the supersede UPDATE touches any gap on
    // idx_email_verifications_address_used, so concurrent issues queue here.
    async fn lock_address(&mut self, address: &str) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO email_verification_locks (address, acquired_count, locked_at)
            VALUES (?, 1, ?)
            ON DUPLICATE KEY UPDATE
                acquired_count = acquired_count + 1,
                locked_at = VALUES(locked_at)
            "#,
        )
        .bind(address)
        .bind(Utc::now().trunc_subsecs(6))
        .execute(&mut *self.tx)
        .await
        .map_err(store_error("Failed to lock address"))?;

        Ok(())
    }

    async fn supersede_unused(
        &mut self,
        address: &str,
        purpose: Option<Purpose>,
    ) -> DomainResult<u64> {
        let result = match purpose {
            Some(purpose) => {
                sqlx::query(
                    "UPDATE email_verifications SET is_used = 1 \
                     WHERE address = ? AND purpose = ? AND is_used = 0",
                )
                .bind(address)
                .bind(purpose.as_str())
                .execute(&mut *self.tx)
                .await
            }
            None => {
                sqlx::query(
                    "UPDATE email_verifications SET is_used = 1 WHERE address = ? AND is_used = 0",
                )
                .bind(address)
                .execute(&mut *self.tx)
                .await
            }
        }
        .map_err(store_error("Failed to supersede verification requests"))?;

        Ok(result.rows_affected())
    }

    async fn insert(
        &mut self,
        request: NewVerificationRequest,
    ) -> DomainResult<VerificationRequest> {
        // DATETIME(6) keeps microseconds
        let created_at = request.created_at.trunc_subsecs(6);
        let expires_at = request.expires_at.trunc_subsecs(6);

        let result = sqlx::query(
            r#"
            INSERT INTO email_verifications (
                address, code, purpose, role_type, profile_id,
                is_used, verified, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, 0, 0, ?, ?)
            "#,
        )
        .bind(&request.address)
        .bind(&request.code)
        .bind(request.purpose.as_str())
        .bind(request.role_type.as_str())
        .bind(request.profile_id)
        .bind(created_at)
        .bind(expires_at)
        .execute(&mut *self.tx)
        .await
        .map_err(store_error("Failed to insert verification request"))?;

        Ok(VerificationRequest {
            id: result.last_insert_id() as i64,
            address: request.address,
            code: request.code,
            purpose: request.purpose,
            role_type: request.role_type,
            profile_id: request.profile_id,
            used: false,
            verified: false,
            created_at,
            expires_at,
        })
    }

    async fn lock_latest(
        &mut self,
        address: &str,
        code: &str,
    ) -> DomainResult<Option<VerificationRequest>> {
        let query = format!(
            "SELECT {} FROM email_verifications \
             WHERE address = ? AND code = ? \
             ORDER BY id DESC LIMIT 1 FOR UPDATE",
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(address)
            .bind(code)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(store_error("Failed to look up verification request"))?;

        row.as_ref().map(MySqlVerificationStore::row_to_request).transpose()
    }

    async fn mark_consumed(&mut self, id: i64) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE email_verifications SET is_used = 1, verified = 1 WHERE id = ? AND is_used = 0",
        )
        .bind(id)
        .execute(&mut *self.tx)
        .await
        .map_err(store_error("Failed to consume verification request"))?;

        if result.rows_affected() == 0 {
            return Err(VerificationError::AlreadyUsed.into());
        }
        Ok(())
    }

    async fn mark_profile_verified(
        &mut self,
        role_type: RoleType,
        profile_id: i64,
        address: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let query = format!(
            "UPDATE {} SET email_verified = 1, verified_at = ? \
             WHERE id = ? AND institutional_email = ?",
            role_type.table_name()
        );

        let result = sqlx::query(&query)
            .bind(at.trunc_subsecs(6))
            .bind(profile_id)
            .bind(address)
            .execute(&mut *self.tx)
            .await
            .map_err(store_error("Failed to flag profile as verified"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn commit(self) -> DomainResult<()> {
        self.tx
            .commit()
            .await
            .map_err(store_error("Failed to commit transaction"))
    }

    async fn rollback(self) -> DomainResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(store_error("Failed to roll back transaction"))
    }
}
