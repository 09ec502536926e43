//! Faculty (academic staff) DTOs. Faculty members are plain academic accounts.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::accounts::{
    AccountChanges, AccountContact, AccountStatus, AccountView, SubRole, blank_clears,
};
use campus_core::serde::{deserialize_email, deserialize_optional_email};

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FacultyFilterParams {
    /// Exact department match.
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub department: Option<String>,
    /// Case-insensitive search over name and email.
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub q: Option<String>,
    pub status: Option<AccountStatus>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacultyDto {
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "Valid email is required"), length(max = 255))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "must be between 6 and 128 characters"))]
    pub password: String,
    pub sub_role: SubRole,
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "crate::validation::validate_person_name")
    )]
    pub name: String,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub department: Option<String>,
    #[validate(custom(function = "crate::validation::validate_avatar_url"))]
    pub avatar_url: Option<String>,
    #[validate(nested)]
    pub contact: Option<AccountContact>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFacultyDto {
    #[serde(default, deserialize_with = "deserialize_optional_email")]
    #[validate(email(message = "Valid email is required"), length(max = 255))]
    pub email: Option<String>,
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "crate::validation::validate_person_name")
    )]
    pub name: Option<String>,
    pub sub_role: Option<SubRole>,
    /// An empty string clears the department.
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub department: Option<String>,
    /// An empty string clears the avatar.
    #[validate(custom(function = "crate::validation::validate_avatar_url"))]
    pub avatar_url: Option<String>,
    #[validate(nested)]
    pub contact: Option<AccountContact>,
}

impl From<UpdateFacultyDto> for AccountChanges {
    fn from(dto: UpdateFacultyDto) -> Self {
        Self {
            email: dto.email,
            sub_role: dto.sub_role,
            name: dto.name.map(|n| Some(n.trim().to_string())),
            avatar_url: blank_clears(dto.avatar_url),
            department: blank_clears(dto.department),
            contact: dto.contact,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FacultyListResponse {
    pub faculty: Vec<AccountView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FacultyResponse {
    pub faculty: AccountView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_requires_sub_role() {
        let result: Result<CreateFacultyDto, _> = serde_json::from_value(json!({
            "email": "f@college.edu",
            "password": "secret1",
            "name": "Prof Frink"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_valid() {
        let dto: CreateFacultyDto = serde_json::from_value(json!({
            "email": "F@College.edu",
            "password": "secret1",
            "subRole": "faculty",
            "name": "Prof Frink",
            "department": "Physics"
        }))
        .unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.email, "f@college.edu");
        assert_eq!(dto.sub_role, SubRole::Faculty);
    }

    #[test]
    fn test_update_blank_department_clears() {
        let dto: UpdateFacultyDto = serde_json::from_value(json!({
            "department": "",
            "avatarUrl": ""
        }))
        .unwrap();
        assert!(dto.validate().is_ok());
        let changes = AccountChanges::from(dto);
        assert_eq!(changes.department, Some(None));
        assert_eq!(changes.avatar_url, Some(None));
        assert!(changes.email.is_none());
        assert!(changes.sub_role.is_none());
    }

    #[test]
    fn test_update_invalid_email() {
        let dto: UpdateFacultyDto =
            serde_json::from_value(json!({ "email": "nope" })).unwrap();
        assert!(dto.validate().is_err());
    }
}
