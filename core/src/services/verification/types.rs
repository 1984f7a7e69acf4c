//! Input types for the verification service

/// Raw request for a new code. Enum fields stay textual so unknown values are
/// reported as validation failures by the service.
#[derive(Debug, Clone, Default)]
pub struct IssueCodeCommand {
    pub address: String,
    pub role_type: Option<String>,
    pub profile_id: Option<i64>,
    pub purpose: Option<String>,
}

impl IssueCodeCommand {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn with_role_type(mut self, role_type: impl Into<String>) -> Self {
        self.role_type = Some(role_type.into());
        self
    }

    pub fn with_profile_id(mut self, profile_id: i64) -> Self {
        self.profile_id = Some(profile_id);
        self
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }
}
