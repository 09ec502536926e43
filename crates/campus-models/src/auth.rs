//! Authentication DTOs: login, registration, password change and profile update.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::accounts::{AccountContact, AccountRole, AccountView, NewAccount, SubRole};
use crate::students::{NewStudentProfile, StudentContact, StudentProfile};
use campus_core::serde::{deserialize_email, deserialize_optional_email};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "Valid email is required"), length(max = 255))]
    pub email: String,
    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    #[schema(example = "password123")]
    pub password: String,
    /// Portal the user is signing in to; must match the account role.
    pub role: AccountRole,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentSignup {
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email(message = "Valid email is required"), length(max = 255))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "must be between 6 and 128 characters"))]
    pub password: String,
    #[validate(
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        custom(function = "crate::validation::validate_person_name")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        custom(function = "crate::validation::validate_person_name")
    )]
    pub last_name: String,
    #[validate(custom(function = "crate::validation::validate_date_of_birth"))]
    pub dob: Option<NaiveDate>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub department: Option<String>,
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub year: Option<i16>,
    #[validate(nested)]
    pub contact: Option<StudentContact>,
    #[validate(custom(function = "crate::validation::validate_avatar_url"))]
    pub avatar_url: Option<String>,
}

impl StudentSignup {
    pub fn profile(&self) -> NewStudentProfile {
        NewStudentProfile {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            dob: self.dob,
            contact: self.contact.clone().unwrap_or_default(),
            department: self.department.clone(),
            year: self.year,
            avatar_url: self.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSignup {
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
    #[validate(nested)]
    pub contact: Option<AccountContact>,
    #[validate(custom(function = "crate::validation::validate_avatar_url"))]
    pub avatar_url: Option<String>,
}

impl AcademicSignup {
    pub fn account(&self, password_hash: String) -> NewAccount {
        NewAccount::academic(
            self.email.clone(),
            password_hash,
            self.sub_role,
            self.name.trim().to_string(),
        )
        .with_department(self.department.clone())
        .with_avatar_url(self.avatar_url.clone())
        .with_contact(self.contact.clone())
    }
}

/// Registration body, discriminated by `role`. Each branch carries its own
/// required fields.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RegisterRequest {
    Student(StudentSignup),
    Academic(AcademicSignup),
}

impl RegisterRequest {
    pub fn email(&self) -> &str {
        match self {
            RegisterRequest::Student(s) => &s.email,
            RegisterRequest::Academic(a) => &a.email,
        }
    }

    pub fn password(&self) -> &str {
        match self {
            RegisterRequest::Student(s) => &s.password,
            RegisterRequest::Academic(a) => &a.password,
        }
    }

    pub fn role(&self) -> AccountRole {
        match self {
            RegisterRequest::Student(_) => AccountRole::Student,
            RegisterRequest::Academic(_) => AccountRole::Academic,
        }
    }
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            RegisterRequest::Student(signup) => signup.validate(),
            RegisterRequest::Academic(signup) => signup.validate(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, max = 128, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 6, max = 128, message = "must be between 6 and 128 characters"))]
    pub new_password: String,
}

/// Self-service profile update. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "deserialize_optional_email")]
    #[validate(email(message = "Valid email is required"), length(max = 255))]
    pub email: Option<String>,
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "crate::validation::validate_person_name")
    )]
    pub name: Option<String>,
    #[validate(custom(function = "crate::validation::validate_avatar_url"))]
    pub avatar_url: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub department: Option<String>,
    #[validate(nested)]
    pub contact: Option<AccountContact>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: AccountView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub user: AccountView,
    pub profile: Option<StudentProfile>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_student_branch() {
        let req: RegisterRequest = serde_json::from_value(json!({
            "role": "student",
            "email": "Stu@Example.com",
            "password": "secret1",
            "firstName": "Stu",
            "lastName": "Dent"
        }))
        .unwrap();
        assert_eq!(req.role(), AccountRole::Student);
        assert_eq!(req.email(), "stu@example.com");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_student_requires_names() {
        let result: Result<RegisterRequest, _> = serde_json::from_value(json!({
            "role": "student",
            "email": "stu@example.com",
            "password": "secret1"
        }));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("missing field `firstName`"));
    }

    #[test]
    fn test_register_academic_requires_sub_role() {
        let result: Result<RegisterRequest, _> = serde_json::from_value(json!({
            "role": "academic",
            "email": "prof@example.com",
            "password": "secret1",
            "name": "Prof"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_register_academic_builds_account() {
        let req: RegisterRequest = serde_json::from_value(json!({
            "role": "academic",
            "email": "prof@example.com",
            "password": "secret1",
            "subRole": "administrative",
            "name": " Prof X ",
            "department": "Maths",
            "contact": { "phone": "+1 555 123 4567" }
        }))
        .unwrap();
        let RegisterRequest::Academic(signup) = req else {
            panic!("expected academic branch");
        };
        let account = signup.account("hash".into());
        assert_eq!(account.sub_role, Some(SubRole::Administrative));
        assert_eq!(account.name.as_deref(), Some("Prof X"));
        assert_eq!(account.contact.phone.as_deref(), Some("+1 555 123 4567"));
    }

    #[test]
    fn test_login_rejects_unknown_role() {
        let result: Result<LoginRequest, _> = serde_json::from_value(json!({
            "email": "a@b.co",
            "password": "x",
            "role": "janitor"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_change_password_validation() {
        let req = ChangePasswordRequest {
            current_password: "old".into(),
            new_password: "123".into(),
        };
        assert!(req.validate().is_err());
    }
}
