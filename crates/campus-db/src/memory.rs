//! In-process [`AccountStore`] for tests.
//!
//! Mirrors the relational behavior the HTTP layer relies on: unique emails, the
//! profile-to-account cascade and newest-first ordering.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use campus_core::AppError;
use campus_models::{
    Account, AccountChanges, AccountRole, AccountStatus, AccountSummary, FacultyFilterParams,
    NewAccount, NewStudentProfile, StudentFilterParams, StudentProfile, StudentProfileChanges,
    StudentRecord,
};

use crate::store::{AccountStore, non_blank};

#[derive(Debug, Default)]
struct Tables {
    accounts: Vec<Account>,
    profiles: Vec<StudentProfile>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.accounts
            .iter()
            .any(|a| a.email == email && Some(a.id) != except)
    }

    fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    fn record(&self, profile: &StudentProfile) -> Option<StudentRecord> {
        let account = self.account(profile.account_id)?;
        if account.role != AccountRole::Student {
            return None;
        }
        Some(StudentRecord {
            profile: profile.clone(),
            user: AccountSummary::from(account),
        })
    }

    fn student_account_id(&self, profile_id: Uuid) -> Option<Uuid> {
        let profile = self.profiles.iter().find(|p| p.id == profile_id)?;
        self.account(profile.account_id)
            .filter(|a| a.role == AccountRole::Student)
            .map(|a| a.id)
    }

    fn remove_account(&mut self, id: Uuid) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != id);
        self.profiles.retain(|p| p.account_id != id);
        self.accounts.len() != before
    }
}

fn build_account(new: NewAccount) -> Account {
    let now = Utc::now();
    Account {
        id: Uuid::new_v4(),
        email: new.email,
        password_hash: new.password_hash,
        role: new.role,
        sub_role: new.sub_role,
        name: new.name,
        avatar_url: new.avatar_url,
        department: new.department,
        contact: new.contact,
        status: new.status,
        created_at: now,
        updated_at: now,
    }
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    tables: RwLock<Tables>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        Ok(self.tables.read().await.account(id).cloned())
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn create_account(&self, account: NewAccount) -> Result<Account, AppError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&account.email, None) {
            return Err(AppError::email_taken());
        }
        let account = build_account(account);
        tables.accounts.push(account.clone());
        Ok(account)
    }

    async fn create_student_account(
        &self,
        account: NewAccount,
        profile: NewStudentProfile,
    ) -> Result<(Account, StudentProfile), AppError> {
        let mut tables = self.tables.write().await;
        if tables.email_taken(&account.email, None) {
            return Err(AppError::email_taken());
        }
        let account = build_account(account);
        let profile = StudentProfile {
            id: Uuid::new_v4(),
            account_id: account.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            dob: profile.dob,
            contact: profile.contact,
            department: profile.department,
            year: profile.year,
            avatar_url: profile.avatar_url,
            created_at: account.created_at,
            updated_at: account.created_at,
        };
        tables.accounts.push(account.clone());
        tables.profiles.push(profile.clone());
        Ok((account, profile))
    }

    async fn update_account(
        &self,
        id: Uuid,
        changes: AccountChanges,
    ) -> Result<Option<Account>, AppError> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &changes.email
            && tables.email_taken(email, Some(id))
        {
            return Err(AppError::email_taken());
        }
        let Some(account) = tables.accounts.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        changes.apply_to(account);
        account.updated_at = Utc::now();
        Ok(Some(account.clone()))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let Some(account) = tables.accounts.iter_mut().find(|a| a.id == id) else {
            return Ok(false);
        };
        account.password_hash = password_hash.to_string();
        account.updated_at = Utc::now();
        Ok(true)
    }

    async fn set_account_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let Some(account) = tables.accounts.iter_mut().find(|a| a.id == id) else {
            return Ok(false);
        };
        account.status = status;
        account.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_account(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.tables.write().await.remove_account(id))
    }

    async fn list_faculty(&self, filter: &FacultyFilterParams) -> Result<Vec<Account>, AppError> {
        let department = non_blank(&filter.department);
        let q = non_blank(&filter.q).map(str::to_lowercase);
        let tables = self.tables.read().await;

        Ok(tables
            .accounts
            .iter()
            .rev()
            .filter(|a| a.role == AccountRole::Academic)
            .filter(|a| department.is_none_or(|d| a.department.as_deref() == Some(d)))
            .filter(|a| filter.status.is_none_or(|s| a.status == s))
            .filter(|a| {
                q.as_deref().is_none_or(|q| {
                    contains_ci(a.name.as_deref(), q) || contains_ci(Some(a.email.as_str()), q)
                })
            })
            .cloned()
            .collect())
    }

    async fn list_students(
        &self,
        filter: &StudentFilterParams,
    ) -> Result<Vec<StudentRecord>, AppError> {
        let department = non_blank(&filter.department);
        let q = non_blank(&filter.q).map(str::to_lowercase);
        let tables = self.tables.read().await;

        Ok(tables
            .profiles
            .iter()
            .rev()
            .filter_map(|p| tables.record(p))
            .filter(|r| department.is_none_or(|d| r.profile.department.as_deref() == Some(d)))
            .filter(|r| filter.year.is_none_or(|y| r.profile.year == Some(y)))
            .filter(|r| filter.status.is_none_or(|s| r.user.status == s))
            .filter(|r| {
                q.as_deref().is_none_or(|q| {
                    contains_ci(Some(r.profile.first_name.as_str()), q)
                        || contains_ci(Some(r.profile.last_name.as_str()), q)
                        || contains_ci(Some(r.user.email.as_str()), q)
                })
            })
            .collect())
    }

    async fn find_student(&self, profile_id: Uuid) -> Result<Option<StudentRecord>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.id == profile_id)
            .and_then(|p| tables.record(p)))
    }

    async fn find_profile_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<StudentProfile>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .profiles
            .iter()
            .find(|p| p.account_id == account_id)
            .cloned())
    }

    async fn update_student_profile(
        &self,
        profile_id: Uuid,
        changes: StudentProfileChanges,
    ) -> Result<Option<StudentProfile>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(profile) = tables.profiles.iter_mut().find(|p| p.id == profile_id) else {
            return Ok(None);
        };
        changes.apply_to(profile);
        profile.updated_at = Utc::now();
        Ok(Some(profile.clone()))
    }

    async fn set_student_status(
        &self,
        profile_id: Uuid,
        status: AccountStatus,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let Some(account_id) = tables.student_account_id(profile_id) else {
            return Ok(false);
        };
        let Some(account) = tables.accounts.iter_mut().find(|a| a.id == account_id) else {
            return Ok(false);
        };
        account.status = status;
        account.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_student(&self, profile_id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables.student_account_id(profile_id) {
            Some(account_id) => Ok(tables.remove_account(account_id)),
            None => Ok(false),
        }
    }
}
