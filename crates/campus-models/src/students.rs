//! Student profile models and DTOs.
//!
//! A student is an [`Account`](crate::accounts::Account) with role `student` plus a
//! one-to-one profile holding the academic and contact details.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::accounts::{AccountStatus, AccountSummary};
use campus_core::serde::deserialize_email;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "crate::validation::validate_phone"))]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub zip: Option<String>,
}

/// A stored student profile.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: Uuid,
    /// Owning account.
    #[serde(rename = "userId")]
    pub account_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub dob: Option<NaiveDate>,
    #[sqlx(json)]
    pub contact: StudentContact,
    pub department: Option<String>,
    pub year: Option<i16>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A profile together with the account it belongs to.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct StudentRecord {
    #[serde(flatten)]
    pub profile: StudentProfile,
    pub user: AccountSummary,
}

/// Insert payload for a student profile; the account id is assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewStudentProfile {
    pub first_name: String,
    pub last_name: String,
    pub dob: Option<NaiveDate>,
    pub contact: StudentContact,
    pub department: Option<String>,
    pub year: Option<i16>,
    pub avatar_url: Option<String>,
}

/// Partial update of a profile; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct StudentProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub contact: Option<StudentContact>,
    pub department: Option<String>,
    pub year: Option<i16>,
    pub avatar_url: Option<String>,
}

impl StudentProfileChanges {
    pub fn apply_to(self, profile: &mut StudentProfile) {
        if let Some(first_name) = self.first_name {
            profile.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            profile.last_name = last_name;
        }
        if let Some(dob) = self.dob {
            profile.dob = Some(dob);
        }
        if let Some(contact) = self.contact {
            profile.contact = contact;
        }
        if let Some(department) = self.department {
            profile.department = Some(department);
        }
        if let Some(year) = self.year {
            profile.year = Some(year);
        }
        if let Some(avatar_url) = self.avatar_url {
            profile.avatar_url = Some(avatar_url);
        }
    }
}

/// Filters for the student directory.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentFilterParams {
    /// Exact department match.
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub department: Option<String>,
    /// Exact year match.
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub year: Option<i16>,
    /// Case-insensitive search over first name, last name and email.
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub q: Option<String>,
    pub status: Option<AccountStatus>,
}

/// Admin-created student account.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
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
    #[validate(nested)]
    pub contact: Option<StudentContact>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub department: Option<String>,
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub year: Option<i16>,
    #[validate(custom(function = "crate::validation::validate_avatar_url"))]
    pub avatar_url: Option<String>,
}

impl CreateStudentDto {
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

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDto {
    #[validate(
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        custom(function = "crate::validation::validate_person_name")
    )]
    pub first_name: Option<String>,
    #[validate(
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        custom(function = "crate::validation::validate_person_name")
    )]
    pub last_name: Option<String>,
    #[validate(custom(function = "crate::validation::validate_date_of_birth"))]
    pub dob: Option<NaiveDate>,
    #[validate(nested)]
    pub contact: Option<StudentContact>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub department: Option<String>,
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub year: Option<i16>,
    #[validate(custom(function = "crate::validation::validate_avatar_url"))]
    pub avatar_url: Option<String>,
}

impl From<UpdateStudentDto> for StudentProfileChanges {
    fn from(dto: UpdateStudentDto) -> Self {
        Self {
            first_name: dto.first_name.map(|s| s.trim().to_string()),
            last_name: dto.last_name.map(|s| s.trim().to_string()),
            dob: dto.dob,
            contact: dto.contact,
            department: dto.department,
            year: dto.year,
            avatar_url: dto.avatar_url,
        }
    }
}

/// Body of `PUT /students/me`: students may only edit their contact block.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateOwnContactDto {
    #[validate(nested)]
    pub contact: StudentContact,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentListResponse {
    pub students: Vec<StudentRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentRecordResponse {
    pub profile: StudentRecord,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentProfileResponse {
    pub profile: StudentProfile,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedStudentResponse {
    pub user: AccountSummary,
    pub profile: StudentProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_dto(value: serde_json::Value) -> CreateStudentDto {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_create_student_dto_validation() {
        let dto = create_dto(json!({
            "email": " S2@Example.com ",
            "password": "temp123",
            "firstName": "Stu2",
            "lastName": "Dent2"
        }));
        assert_eq!(dto.email, "s2@example.com");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_student_dto_short_password() {
        let dto = create_dto(json!({
            "email": "s@example.com",
            "password": "12345",
            "firstName": "A",
            "lastName": "B"
        }));
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_year_out_of_range() {
        let dto = create_dto(json!({
            "email": "s@example.com",
            "password": "123456",
            "firstName": "A",
            "lastName": "B",
            "year": 6
        }));
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("year"));
    }

    #[test]
    fn test_nested_contact_validation() {
        let dto = create_dto(json!({
            "email": "s@example.com",
            "password": "123456",
            "firstName": "A",
            "lastName": "B",
            "contact": { "phone": "not a phone" }
        }));
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let now = Utc::now();
        let profile = StudentProfile {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            first_name: "Stu".into(),
            last_name: "Dent".into(),
            dob: None,
            contact: StudentContact {
                city: Some("Lagos".into()),
                ..Default::default()
            },
            department: None,
            year: Some(2),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["firstName"], "Stu");
        assert_eq!(json["contact"]["city"], "Lagos");
        assert!(json.get("userId").is_some());
    }

    #[test]
    fn test_update_changes_apply() {
        let now = Utc::now();
        let mut profile = StudentProfile {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            first_name: "Old".into(),
            last_name: "Name".into(),
            dob: None,
            contact: StudentContact::default(),
            department: Some("Physics".into()),
            year: Some(1),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        };
        StudentProfileChanges::from(UpdateStudentDto {
            first_name: Some(" New ".into()),
            year: Some(3),
            ..Default::default()
        })
        .apply_to(&mut profile);

        assert_eq!(profile.first_name, "New");
        assert_eq!(profile.last_name, "Name");
        assert_eq!(profile.year, Some(3));
        assert_eq!(profile.department.as_deref(), Some("Physics"));
    }
}
