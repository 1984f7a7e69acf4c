use serde::{Deserialize, Serialize};
use validator::Validate;

use ss_core::{
    AcademicDegree, DomainError, ProfileDetails, RegisterProfileCommand, RoleType,
    ValidationError,
};

/// Body of `POST /students`, `POST /faculty` and `POST /alumni`
///
/// Role-specific fields that do not apply to the target role are ignored.
/// Required camelCase fields are checked by the registration service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfileRequest {
    #[serde(default)]
    pub full_name: String,

    /// Institutional email address
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "address is required"))]
    pub address: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 128, message = "password is required"))]
    pub password: String,

    // Student
    pub control_number: Option<String>,
    pub current_program: Option<String>,
    pub other_program: Option<String>,
    pub semester: Option<i32>,

    // Faculty and alumni
    pub degree_program: Option<String>,
    pub academic_degree: Option<String>,
    pub graduation_year: Option<i32>,

    #[validate(length(max = 1000))]
    pub skills: Option<String>,
    #[validate(length(max = 1000))]
    pub interests: Option<String>,
}

impl RegisterProfileRequest {
    /// Build the registration command for the role named by the route
    pub fn into_command(self, role_type: RoleType) -> Result<RegisterProfileCommand, DomainError> {
        let details = match role_type {
            RoleType::Student => ProfileDetails::Student {
                control_number: self.control_number.unwrap_or_default(),
                current_program: self.current_program.unwrap_or_default(),
                other_program: self.other_program,
                semester: self.semester,
            },
            RoleType::Faculty => ProfileDetails::Faculty {
                degree_program: self.degree_program,
                academic_degree: self
                    .academic_degree
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| value.parse::<AcademicDegree>())
                    .transpose()?,
            },
            RoleType::Alumnus => ProfileDetails::Alumnus {
                degree_program: self.degree_program.unwrap_or_default(),
                graduation_year: self
                    .graduation_year
                    .ok_or_else(|| ValidationError::required("graduationYear"))?,
            },
        };

        Ok(RegisterProfileCommand {
            full_name: self.full_name,
            address: self.address,
            password: self.password,
            details,
            skills: self.skills,
            interests: self.interests,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterProfileRequest {
        RegisterProfileRequest {
            full_name: "Luis Ortega".to_string(),
            address: "luis@itcelaya.edu.mx".to_string(),
            password: "correct-horse".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_faculty_degree_is_parsed() {
        let command = RegisterProfileRequest {
            academic_degree: Some("Master".to_string()),
            ..request()
        }
        .into_command(RoleType::Faculty)
        .unwrap();

        assert_eq!(
            command.details,
            ProfileDetails::Faculty {
                degree_program: None,
                academic_degree: Some(AcademicDegree::Master),
            }
        );
    }

    #[test]
    fn test_unknown_degree_is_rejected() {
        let result = RegisterProfileRequest {
            academic_degree: Some("wizard".to_string()),
            ..request()
        }
        .into_command(RoleType::Faculty);

        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::UnknownValue { .. }))
        ));
    }

    #[test]
    fn test_alumnus_requires_graduation_year() {
        let result = RegisterProfileRequest {
            degree_program: Some("ISC".to_string()),
            ..request()
        }
        .into_command(RoleType::Alumnus);

        assert!(matches!(
            result,
            Err(DomainError::Validation(ValidationError::RequiredField { ref field }))
                if field == "graduationYear"
        ));
    }

    #[test]
    fn test_deserializes_camel_case() {
        let request: RegisterProfileRequest = serde_json::from_value(serde_json::json!({
            "fullName": "Ana Lopez",
            "address": "ana@itcelaya.edu.mx",
            "password": "s3cret-pass",
            "controlNumber": "20030123",
            "currentProgram": "ISC",
            "semester": 4
        }))
        .unwrap();

        assert_eq!(request.control_number.as_deref(), Some("20030123"));
        assert_eq!(request.semester, Some(4));
        assert!(request.validate().is_ok());
    }
}
