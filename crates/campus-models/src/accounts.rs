//! Account entity, role types and the sanitized views returned to clients.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Primary role of an account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Academic,
    Student,
}

impl AccountRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Academic => "academic",
            AccountRole::Student => "student",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification inside the academic role. Administrators manage records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "sub_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubRole {
    Faculty,
    Administrative,
}

impl SubRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubRole::Faculty => "faculty",
            SubRole::Administrative => "administrative",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "account_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountContact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "crate::validation::validate_phone"))]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub address: Option<String>,
}

impl AccountContact {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.address.is_none()
    }
}

/// A stored account. The password hash never leaves the server; respond with
/// [`AccountView`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: AccountRole,
    pub sub_role: Option<SubRole>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub department: Option<String>,
    #[sqlx(json)]
    pub contact: AccountContact,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn is_administrator(&self) -> bool {
        self.role == AccountRole::Academic && self.sub_role == Some(SubRole::Administrative)
    }
}

/// Sanitized account returned by every endpoint.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: Uuid,
    pub email: String,
    pub role: AccountRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_role: Option<SubRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<AccountContact>,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            role: account.role,
            sub_role: account.sub_role,
            name: account.name.clone(),
            avatar_url: account.avatar_url.clone(),
            department: account.department.clone(),
            contact: (!account.contact.is_empty()).then(|| account.contact.clone()),
            status: account.status,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self::from(&account)
    }
}

/// Minimal account reference embedded in student records.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct AccountSummary {
    pub id: Uuid,
    pub email: String,
    pub role: AccountRole,
    pub status: AccountStatus,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            role: account.role,
            status: account.status,
        }
    }
}

/// Insert payload for an account. Constructed through [`NewAccount::student`] or
/// [`NewAccount::academic`] so the sub-role is present exactly for academics.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub role: AccountRole,
    pub sub_role: Option<SubRole>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub department: Option<String>,
    pub contact: AccountContact,
    pub status: AccountStatus,
}

impl NewAccount {
    pub fn student(email: String, password_hash: String) -> Self {
        Self {
            email,
            password_hash,
            role: AccountRole::Student,
            sub_role: None,
            name: None,
            avatar_url: None,
            department: None,
            contact: AccountContact::default(),
            status: AccountStatus::Active,
        }
    }

    pub fn academic(email: String, password_hash: String, sub_role: SubRole, name: String) -> Self {
        Self {
            email,
            password_hash,
            role: AccountRole::Academic,
            sub_role: Some(sub_role),
            name: Some(name),
            avatar_url: None,
            department: None,
            contact: AccountContact::default(),
            status: AccountStatus::Active,
        }
    }

    pub fn with_department(mut self, department: Option<String>) -> Self {
        self.department = department;
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: Option<String>) -> Self {
        self.avatar_url = avatar_url;
        self
    }

    pub fn with_contact(mut self, contact: Option<AccountContact>) -> Self {
        self.contact = contact.unwrap_or_default();
        self
    }
}

/// Partial update of an account.
///
/// For the nested options, `None` leaves the column untouched and `Some(None)`
/// clears it.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub email: Option<String>,
    pub sub_role: Option<SubRole>,
    pub name: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
    pub department: Option<Option<String>>,
    pub contact: Option<AccountContact>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.sub_role.is_none()
            && self.name.is_none()
            && self.avatar_url.is_none()
            && self.department.is_none()
            && self.contact.is_none()
    }

    /// Applies the changes to an in-memory account.
    pub fn apply_to(self, account: &mut Account) {
        if let Some(email) = self.email {
            account.email = email;
        }
        if let Some(sub_role) = self.sub_role {
            account.sub_role = Some(sub_role);
        }
        if let Some(name) = self.name {
            account.name = name;
        }
        if let Some(avatar_url) = self.avatar_url {
            account.avatar_url = avatar_url;
        }
        if let Some(department) = self.department {
            account.department = department;
        }
        if let Some(contact) = self.contact {
            account.contact = contact;
        }
    }
}

/// Treats a blank string as a request to clear an optional column.
pub fn blank_clears(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StatusUpdateRequest {
    pub status: AccountStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        let now = Utc::now();
        Account {
            id: Uuid::new_v4(),
            email: "admin@college.edu".to_string(),
            password_hash: "$2b$10$hash".to_string(),
            role: AccountRole::Academic,
            sub_role: Some(SubRole::Administrative),
            name: Some("Ada Admin".to_string()),
            avatar_url: None,
            department: Some("Registry".to_string()),
            contact: AccountContact::default(),
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_view_never_contains_password_hash() {
        let view = AccountView::from(&sample_account());
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["subRole"], "administrative");
        assert_eq!(json["role"], "academic");
        assert!(json.get("contact").is_none());
    }

    #[test]
    fn test_is_administrator() {
        let mut account = sample_account();
        assert!(account.is_administrator());
        account.sub_role = Some(SubRole::Faculty);
        assert!(!account.is_administrator());
    }

    #[test]
    fn test_constructors_respect_sub_role_invariant() {
        let student = NewAccount::student("s@x.io".into(), "h".into());
        assert_eq!(student.role, AccountRole::Student);
        assert!(student.sub_role.is_none());

        let academic =
            NewAccount::academic("a@x.io".into(), "h".into(), SubRole::Faculty, "A".into());
        assert_eq!(academic.sub_role, Some(SubRole::Faculty));
    }

    #[test]
    fn test_blank_clears() {
        assert_eq!(blank_clears(None), None);
        assert_eq!(blank_clears(Some("  ".into())), Some(None));
        assert_eq!(blank_clears(Some(" Math ".into())), Some(Some("Math".into())));
    }

    #[test]
    fn test_apply_changes() {
        let mut account = sample_account();
        AccountChanges {
            department: Some(None),
            name: Some(Some("Ada L.".into())),
            ..Default::default()
        }
        .apply_to(&mut account);
        assert!(account.department.is_none());
        assert_eq!(account.name.as_deref(), Some("Ada L."));
    }

    #[test]
    fn test_status_deserialize() {
        let req: StatusUpdateRequest = serde_json::from_str(r#"{"status":"inactive"}"#).unwrap();
        assert_eq!(req.status, AccountStatus::Inactive);
        assert!(serde_json::from_str::<StatusUpdateRequest>(r#"{"status":"gone"}"#).is_err());
    }
}
