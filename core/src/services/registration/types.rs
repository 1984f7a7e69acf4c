//! Input and result types for profile registration

use serde::Serialize;

use crate::domain::entities::ProfileDetails;
use crate::domain::value_objects::RoleType;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Profile registration request
#[derive(Debug, Clone)]
pub struct RegisterProfileCommand {
    pub full_name: String,
    /// Institutional email address
    pub address: String,
    /// Plain-text password; hashed before it reaches the store
    pub password: String,
    pub details: ProfileDetails,
    pub skills: Option<String>,
    pub interests: Option<String>,
}

impl RegisterProfileCommand {
    pub fn role_type(&self) -> RoleType {
        self.details.role_type()
    }
}

/// Result of a registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub id: i64,
    pub role_type: RoleType,
    pub address: String,
    /// Whether a signup code was stored for the new profile
    pub code_issued: bool,
}
