//! The persistence contract used by the HTTP layer.

use std::fmt::Debug;

use async_trait::async_trait;
use uuid::Uuid;

use campus_core::AppError;
use campus_models::{
    Account, AccountChanges, AccountStatus, FacultyFilterParams, NewAccount, NewStudentProfile,
    StudentFilterParams, StudentProfile, StudentProfileChanges, StudentRecord,
};

/// Accounts and student profiles.
///
/// Implementations enforce email uniqueness and report a clash as
/// [`AppError::email_taken`], including when two writers race for the same
/// address. Methods addressing a row by id return `None`/`false` when it is absent.
#[async_trait]
pub trait AccountStore: Send + Sync + Debug {
    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError>;

    /// `email` must already be normalized.
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    async fn create_account(&self, account: NewAccount) -> Result<Account, AppError>;

    /// Creates a student account and its profile atomically.
    async fn create_student_account(
        &self,
        account: NewAccount,
        profile: NewStudentProfile,
    ) -> Result<(Account, StudentProfile), AppError>;

    async fn update_account(
        &self,
        id: Uuid,
        changes: AccountChanges,
    ) -> Result<Option<Account>, AppError>;

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, AppError>;

    async fn set_account_status(&self, id: Uuid, status: AccountStatus)
    -> Result<bool, AppError>;

    /// Removes the account and, through the profile's foreign key, any profile.
    async fn delete_account(&self, id: Uuid) -> Result<bool, AppError>;

    async fn list_faculty(&self, filter: &FacultyFilterParams) -> Result<Vec<Account>, AppError>;

    /// Profiles whose owning account has the student role.
    async fn list_students(
        &self,
        filter: &StudentFilterParams,
    ) -> Result<Vec<StudentRecord>, AppError>;

    async fn find_student(&self, profile_id: Uuid) -> Result<Option<StudentRecord>, AppError>;

    async fn find_profile_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<StudentProfile>, AppError>;

    async fn update_student_profile(
        &self,
        profile_id: Uuid,
        changes: StudentProfileChanges,
    ) -> Result<Option<StudentProfile>, AppError>;

    /// Sets the status of the account owning the profile.
    async fn set_student_status(
        &self,
        profile_id: Uuid,
        status: AccountStatus,
    ) -> Result<bool, AppError>;

    /// Removes the profile together with its account.
    async fn delete_student(&self, profile_id: Uuid) -> Result<bool, AppError>;
}

/// Builds a case-insensitive `LIKE` pattern matching `needle` anywhere.
pub fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    for c in needle.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("%{}%", escaped)
}

/// Empty query-string values are treated as absent filters.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
