//! Profile role types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Kind of profile an email address belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    Student,
    Faculty,
    Alumnus,
}

impl RoleType {
    pub const ALL: [RoleType; 3] = [RoleType::Student, RoleType::Faculty, RoleType::Alumnus];

    /// Wire and storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleType::Student => "student",
            RoleType::Faculty => "faculty",
            RoleType::Alumnus => "alumnus",
        }
    }

    /// Relational table holding profiles of this role
    pub fn table_name(&self) -> &'static str {
        match self {
            RoleType::Student => "students",
            RoleType::Faculty => "faculty",
            RoleType::Alumnus => "alumni",
        }
    }

    /// Parse an optional raw value, falling back to `default` when absent or blank.
    ///
    /// A blank default makes the field mandatory.
    pub fn resolve(raw: Option<&str>, default: &str) -> Result<Self, ValidationError> {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => value.parse(),
            None if default.trim().is_empty() => Err(ValidationError::required("roleType")),
            None => default.parse(),
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(RoleType::Student),
            "faculty" => Ok(RoleType::Faculty),
            "alumnus" => Ok(RoleType::Alumnus),
            other => Err(ValidationError::unknown("roleType", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("Faculty".parse::<RoleType>(), Ok(RoleType::Faculty));
        assert_eq!(" ALUMNUS ".parse::<RoleType>(), Ok(RoleType::Alumnus));
        assert!(matches!(
            "teacher".parse::<RoleType>(),
            Err(ValidationError::UnknownValue { .. })
        ));
    }

    #[test]
    fn test_resolve_with_default() {
        assert_eq!(RoleType::resolve(None, "student"), Ok(RoleType::Student));
        assert_eq!(RoleType::resolve(Some("  "), "student"), Ok(RoleType::Student));
        assert_eq!(RoleType::resolve(Some("faculty"), "student"), Ok(RoleType::Faculty));
        assert_eq!(
            RoleType::resolve(None, ""),
            Err(ValidationError::required("roleType"))
        );
    }

    #[test]
    fn test_table_names() {
        assert_eq!(RoleType::Student.table_name(), "students");
        assert_eq!(RoleType::Faculty.table_name(), "faculty");
        assert_eq!(RoleType::Alumnus.table_name(), "alumni");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&RoleType::Alumnus).unwrap();
        assert_eq!(json, "\"alumnus\"");
    }
}
