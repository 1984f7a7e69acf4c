//! Role-specific profile entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::value_objects::RoleType;
use crate::errors::ValidationError;

/// Highest academic degree held by a faculty member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcademicDegree {
    Bachelor,
    Master,
    Doctorate,
    Specialization,
}

impl AcademicDegree {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcademicDegree::Bachelor => "bachelor",
            AcademicDegree::Master => "master",
            AcademicDegree::Doctorate => "doctorate",
            AcademicDegree::Specialization => "specialization",
        }
    }
}

impl fmt::Display for AcademicDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AcademicDegree {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bachelor" => Ok(AcademicDegree::Bachelor),
            "master" => Ok(AcademicDegree::Master),
            "doctorate" => Ok(AcademicDegree::Doctorate),
            "specialization" => Ok(AcademicDegree::Specialization),
            other => Err(ValidationError::unknown("academicDegree", other)),
        }
    }
}

/// Fields that differ between the three role types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "roleType", rename_all = "lowercase")]
pub enum ProfileDetails {
    #[serde(rename_all = "camelCase")]
    Student {
        control_number: String,
        current_program: String,
        other_program: Option<String>,
        semester: Option<i32>,
    },
    #[serde(rename_all = "camelCase")]
    Faculty {
        degree_program: Option<String>,
        academic_degree: Option<AcademicDegree>,
    },
    #[serde(rename_all = "camelCase")]
    Alumnus {
        degree_program: String,
        graduation_year: i32,
    },
}

impl ProfileDetails {
    pub fn role_type(&self) -> RoleType {
        match self {
            ProfileDetails::Student { .. } => RoleType::Student,
            ProfileDetails::Faculty { .. } => RoleType::Faculty,
            ProfileDetails::Alumnus { .. } => RoleType::Alumnus,
        }
    }

    /// Check the role-specific required fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ProfileDetails::Student {
                control_number,
                current_program,
                semester,
                ..
            } => {
                require("controlNumber", control_number)?;
                require("currentProgram", current_program)?;
                if matches!(semester, Some(value) if *value < 1) {
                    return Err(ValidationError::InvalidFormat {
                        field: "semester".to_string(),
                    });
                }
                Ok(())
            }
            ProfileDetails::Faculty { .. } => Ok(()),
            ProfileDetails::Alumnus {
                degree_program,
                graduation_year,
            } => {
                require("degreeProgram", degree_program)?;
                if !(1900..=2100).contains(graduation_year) {
                    return Err(ValidationError::InvalidFormat {
                        field: "graduationYear".to_string(),
                    });
                }
                Ok(())
            }
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::required(field))
    } else {
        Ok(())
    }
}

/// A stored profile as returned to callers. The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub full_name: String,
    /// Institutional email address
    pub address: String,
    #[serde(flatten)]
    pub details: ProfileDetails,
    pub skills: Option<String>,
    pub interests: Option<String>,
    pub verified: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn role_type(&self) -> RoleType {
        self.details.role_type()
    }
}

/// Values for a profile about to be inserted
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub full_name: String,
    pub address: String,
    pub password_hash: String,
    pub details: ProfileDetails,
    pub skills: Option<String>,
    pub interests: Option<String>,
}

impl NewProfile {
    pub fn role_type(&self) -> RoleType {
        self.details.role_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_requires_control_number() {
        let details = ProfileDetails::Student {
            control_number: " ".to_string(),
            current_program: "ISC".to_string(),
            other_program: None,
            semester: Some(5),
        };
        assert_eq!(
            details.validate(),
            Err(ValidationError::required("controlNumber"))
        );
    }

    #[test]
    fn test_alumnus_graduation_year_range() {
        let details = ProfileDetails::Alumnus {
            degree_program: "IIND".to_string(),
            graduation_year: 1850,
        };
        assert!(details.validate().is_err());
    }

    #[test]
    fn test_faculty_fields_are_optional() {
        let details = ProfileDetails::Faculty {
            degree_program: None,
            academic_degree: None,
        };
        assert!(details.validate().is_ok());
        assert_eq!(details.role_type(), RoleType::Faculty);
    }

    #[test]
    fn test_profile_serializes_flat_camel_case() {
        let profile = Profile {
            id: 3,
            full_name: "Ana Lopez".to_string(),
            address: "ana@itcelaya.edu.mx".to_string(),
            details: ProfileDetails::Faculty {
                degree_program: Some("ISC".to_string()),
                academic_degree: Some(AcademicDegree::Master),
            },
            skills: None,
            interests: None,
            verified: false,
            verified_at: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["roleType"], "faculty");
        assert_eq!(json["academicDegree"], "master");
        assert_eq!(json["fullName"], "Ana Lopez");
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_academic_degree_parse() {
        assert_eq!("Doctorate".parse::<AcademicDegree>(), Ok(AcademicDegree::Doctorate));
        assert!("phd".parse::<AcademicDegree>().is_err());
    }
}
