//! MySQL implementation of the ProfileRepository trait.
//!
//! Each role type lives in its own table; the shared columns have the same
//! names everywhere so only the role-specific ones differ per query.

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use ss_core::domain::entities::{AcademicDegree, NewProfile, Profile, ProfileDetails};
use ss_core::domain::value_objects::RoleType;
use ss_core::errors::{DomainError, DomainResult};
use ss_core::repositories::ProfileRepository;

use super::{column, store_error};

const COMMON_COLUMNS: &str =
    "id, full_name, institutional_email, skills, interests, email_verified, verified_at, created_at";

/// MySQL implementation of ProfileRepository
#[derive(Clone)]
pub struct MySqlProfileRepository {
    pool: MySqlPool,
}

impl MySqlProfileRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn role_columns(role_type: RoleType) -> &'static str {
        match role_type {
            RoleType::Student => "control_number, current_program, other_program, semester",
            RoleType::Faculty => "degree_program, academic_degree",
            RoleType::Alumnus => "degree_program, graduation_year",
        }
    }

    fn row_to_details(role_type: RoleType, row: &MySqlRow) -> Result<ProfileDetails, DomainError> {
        Ok(match role_type {
            RoleType::Student => ProfileDetails::Student {
                control_number: column(row, "control_number")?,
                current_program: column(row, "current_program")?,
                other_program: column(row, "other_program")?,
                semester: column(row, "semester")?,
            },
            RoleType::Faculty => {
                let degree: Option<String> = column(row, "academic_degree")?;
                ProfileDetails::Faculty {
                    degree_program: column(row, "degree_program")?,
                    academic_degree: degree
                        .filter(|value| !value.is_empty())
                        .map(|value| value.parse::<AcademicDegree>())
                        .transpose()
                        .map_err(|e| {
                            DomainError::internal(format!("Stored academic degree is invalid: {}", e))
                        })?,
                }
            }
            RoleType::Alumnus => ProfileDetails::Alumnus {
                degree_program: column(row, "degree_program")?,
                graduation_year: column(row, "graduation_year")?,
            },
        })
    }

    fn row_to_profile(role_type: RoleType, row: &MySqlRow) -> Result<Profile, DomainError> {
        Ok(Profile {
            id: column(row, "id")?,
            full_name: column(row, "full_name")?,
            address: column(row, "institutional_email")?,
            details: Self::row_to_details(role_type, row)?,
            skills: column(row, "skills")?,
            interests: column(row, "interests")?,
            verified: column(row, "email_verified")?,
            verified_at: column(row, "verified_at")?,
            created_at: column(row, "created_at")?,
        })
    }
}

#[async_trait]
impl ProfileRepository for MySqlProfileRepository {
    async fn find_by_id(&self, role_type: RoleType, id: i64) -> DomainResult<Option<Profile>> {
        let query = format!(
            "SELECT {}, {} FROM {} WHERE id = ? LIMIT 1",
            COMMON_COLUMNS,
            Self::role_columns(role_type),
            role_type.table_name()
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error("Failed to find profile"))?;

        row.as_ref()
            .map(|row| Self::row_to_profile(role_type, row))
            .transpose()
    }

    async fn exists_by_address(&self, role_type: RoleType, address: &str) -> DomainResult<bool> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE institutional_email = ?) AS found",
            role_type.table_name()
        );

        let row = sqlx::query(&query)
            .bind(address)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error("Failed to check profile existence"))?;

        let found: i64 = column(&row, "found")?;
        Ok(found == 1)
    }

    async fn create(&self, profile: NewProfile) -> DomainResult<Profile> {
        let role_type = profile.role_type();
        let created_at = Utc::now().trunc_subsecs(6);

        let query = match &profile.details {
            ProfileDetails::Student {
                control_number,
                current_program,
                other_program,
                semester,
            } => sqlx::query(
                r#"
                INSERT INTO students (
                    full_name, institutional_email, password_hash, control_number,
                    current_program, other_program, semester, skills, interests,
                    email_verified, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?)
                "#,
            )
            .bind(&profile.full_name)
            .bind(&profile.address)
            .bind(&profile.password_hash)
            .bind(control_number)
            .bind(current_program)
            .bind(other_program)
            .bind(semester),
            ProfileDetails::Faculty {
                degree_program,
                academic_degree,
            } => sqlx::query(
                r#"
                INSERT INTO faculty (
                    full_name, institutional_email, password_hash, degree_program,
                    academic_degree, skills, interests, email_verified, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?)
                "#,
            )
            .bind(&profile.full_name)
            .bind(&profile.address)
            .bind(&profile.password_hash)
            .bind(degree_program)
            .bind(academic_degree.map(|degree| degree.as_str())),
            ProfileDetails::Alumnus {
                degree_program,
                graduation_year,
            } => sqlx::query(
                r#"
                INSERT INTO alumni (
                    full_name, institutional_email, password_hash, degree_program,
                    graduation_year, skills, interests, email_verified, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?)
                "#,
            )
            .bind(&profile.full_name)
            .bind(&profile.address)
            .bind(&profile.password_hash)
            .bind(degree_program)
            .bind(graduation_year),
        };

        let result = query
            .bind(&profile.skills)
            .bind(&profile.interests)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => DomainError::Conflict {
                    message: format!("{} address already registered", role_type),
                },
                other => store_error("Failed to create profile")(other),
            })?;

        Ok(Profile {
            id: result.last_insert_id() as i64,
            full_name: profile.full_name,
            address: profile.address,
            details: profile.details,
            skills: profile.skills,
            interests: profile.interests,
            verified: false,
            verified_at: None,
            created_at,
        })
    }
}
