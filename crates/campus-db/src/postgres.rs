//! PostgreSQL-backed [`AccountStore`].

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, types::Json};
use tracing::instrument;
use uuid::Uuid;

use campus_core::AppError;
use campus_models::{
    Account, AccountChanges, AccountRole, AccountStatus, AccountSummary, FacultyFilterParams,
    NewAccount, NewStudentProfile, StudentFilterParams, StudentProfile, StudentProfileChanges,
    StudentRecord,
};

use crate::store::{AccountStore, contains_pattern, non_blank};

const ACCOUNT_COLUMNS: &str = "id, email, password_hash, role, sub_role, name, avatar_url, \
    department, contact, status, created_at, updated_at";

const PROFILE_COLUMNS: &str = "id, account_id, first_name, last_name, dob, contact, \
    department, year, avatar_url, created_at, updated_at";

const RECORD_SELECT: &str = "SELECT p.id, p.account_id, p.first_name, p.last_name, p.dob, \
    p.contact, p.department, p.year, p.avatar_url, p.created_at, p.updated_at, \
    a.email AS account_email, a.role AS account_role, a.status AS account_status \
    FROM student_profiles p \
    JOIN accounts a ON a.id = p.account_id";

#[derive(FromRow)]
struct StudentRecordRow {
    #[sqlx(flatten)]
    profile: StudentProfile,
    account_email: String,
    account_role: AccountRole,
    account_status: AccountStatus,
}

impl From<StudentRecordRow> for StudentRecord {
    fn from(row: StudentRecordRow) -> Self {
        let user = AccountSummary {
            id: row.profile.account_id,
            email: row.account_email,
            role: row.account_role,
            status: row.account_status,
        };
        Self {
            profile: row.profile,
            user,
        }
    }
}

/// Maps write failures, turning unique violations on `email` into a 409.
fn map_write_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return AppError::email_taken();
    }
    AppError::database(err)
}

#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Deletes every account whose email ends with `suffix`. Used to clear seed data.
    #[instrument(skip(self))]
    pub async fn delete_accounts_by_email_suffix(&self, suffix: &str) -> Result<u64, AppError> {
        let pattern = format!("%{}", suffix.replace('%', "\\%").replace('_', "\\_"));
        let result = sqlx::query("DELETE FROM accounts WHERE email LIKE $1")
            .bind(pattern)
            .execute(&self.pool)
            .await
            .map_err(AppError::database)?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    #[instrument(skip(self))]
    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1");
        sqlx::query_as::<_, Account>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self, account), fields(email = %account.email, role = %account.role))]
    async fn create_account(&self, account: NewAccount) -> Result<Account, AppError> {
        let sql = format!(
            "INSERT INTO accounts \
                (email, password_hash, role, sub_role, name, avatar_url, department, contact, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {ACCOUNT_COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.role)
            .bind(account.sub_role)
            .bind(&account.name)
            .bind(&account.avatar_url)
            .bind(&account.department)
            .bind(Json(&account.contact))
            .bind(account.status)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self, account, profile), fields(email = %account.email))]
    async fn create_student_account(
        &self,
        account: NewAccount,
        profile: NewStudentProfile,
    ) -> Result<(Account, StudentProfile), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::database)?;

        let account_sql = format!(
            "INSERT INTO accounts (email, password_hash, role, sub_role, contact, status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ACCOUNT_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Account>(&account_sql)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.role)
            .bind(account.sub_role)
            .bind(Json(&account.contact))
            .bind(account.status)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_write_error)?;

        let profile_sql = format!(
            "INSERT INTO student_profiles \
                (account_id, first_name, last_name, dob, contact, department, year, avatar_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {PROFILE_COLUMNS}"
        );
        let created_profile = sqlx::query_as::<_, StudentProfile>(&profile_sql)
            .bind(created.id)
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(profile.dob)
            .bind(Json(&profile.contact))
            .bind(&profile.department)
            .bind(profile.year)
            .bind(&profile.avatar_url)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok((created, created_profile))
    }

    #[instrument(skip(self, changes))]
    async fn update_account(
        &self,
        id: Uuid,
        changes: AccountChanges,
    ) -> Result<Option<Account>, AppError> {
        let sql = format!(
            "UPDATE accounts SET \
                email = COALESCE($2, email), \
                sub_role = COALESCE($3::sub_role, sub_role), \
                name = CASE WHEN $4::boolean THEN $5::text ELSE name END, \
                avatar_url = CASE WHEN $6::boolean THEN $7::text ELSE avatar_url END, \
                department = CASE WHEN $8::boolean THEN $9::text ELSE department END, \
                contact = COALESCE($10::jsonb, contact), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {ACCOUNT_COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .bind(changes.email.as_deref())
            .bind(changes.sub_role)
            .bind(changes.name.is_some())
            .bind(changes.name.flatten())
            .bind(changes.avatar_url.is_some())
            .bind(changes.avatar_url.flatten())
            .bind(changes.department.is_some())
            .bind(changes.department.flatten())
            .bind(changes.contact.as_ref().map(Json))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE accounts SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(AppError::database)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn set_account_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE accounts SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(status)
                .execute(&self.pool)
                .await
                .map_err(AppError::database)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::database)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn list_faculty(&self, filter: &FacultyFilterParams) -> Result<Vec<Account>, AppError> {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts \
             WHERE role = 'academic' \
               AND ($1::text IS NULL OR department = $1) \
               AND ($2::account_status IS NULL OR status = $2) \
               AND ($3::text IS NULL OR name ILIKE $3 OR email ILIKE $3) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(non_blank(&filter.department))
            .bind(filter.status)
            .bind(non_blank(&filter.q).map(contains_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn list_students(
        &self,
        filter: &StudentFilterParams,
    ) -> Result<Vec<StudentRecord>, AppError> {
        let sql = format!(
            "{RECORD_SELECT} \
             WHERE a.role = 'student' \
               AND ($1::text IS NULL OR p.department = $1) \
               AND ($2::smallint IS NULL OR p.year = $2) \
               AND ($3::account_status IS NULL OR a.status = $3) \
               AND ($4::text IS NULL \
                    OR p.first_name ILIKE $4 OR p.last_name ILIKE $4 OR a.email ILIKE $4) \
             ORDER BY p.created_at DESC"
        );
        let rows = sqlx::query_as::<_, StudentRecordRow>(&sql)
            .bind(non_blank(&filter.department))
            .bind(filter.year)
            .bind(filter.status)
            .bind(non_blank(&filter.q).map(contains_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::database)?;

        Ok(rows.into_iter().map(StudentRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_student(&self, profile_id: Uuid) -> Result<Option<StudentRecord>, AppError> {
        let sql = format!("{RECORD_SELECT} WHERE p.id = $1 AND a.role = 'student'");
        let row = sqlx::query_as::<_, StudentRecordRow>(&sql)
            .bind(profile_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)?;

        Ok(row.map(StudentRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_profile_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<StudentProfile>, AppError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM student_profiles WHERE account_id = $1");
        sqlx::query_as::<_, StudentProfile>(&sql)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self, changes))]
    async fn update_student_profile(
        &self,
        profile_id: Uuid,
        changes: StudentProfileChanges,
    ) -> Result<Option<StudentProfile>, AppError> {
        let sql = format!(
            "UPDATE student_profiles SET \
                first_name = COALESCE($2, first_name), \
                last_name = COALESCE($3, last_name), \
                dob = COALESCE($4::date, dob), \
                contact = COALESCE($5::jsonb, contact), \
                department = COALESCE($6, department), \
                year = COALESCE($7::smallint, year), \
                avatar_url = COALESCE($8, avatar_url), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, StudentProfile>(&sql)
            .bind(profile_id)
            .bind(changes.first_name)
            .bind(changes.last_name)
            .bind(changes.dob)
            .bind(changes.contact.as_ref().map(Json))
            .bind(changes.department)
            .bind(changes.year)
            .bind(changes.avatar_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn set_student_status(
        &self,
        profile_id: Uuid,
        status: AccountStatus,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE accounts SET status = $2, updated_at = NOW() \
             WHERE role = 'student' \
               AND id = (SELECT account_id FROM student_profiles WHERE id = $1)",
        )
        .bind(profile_id)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(AppError::database)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_student(&self, profile_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM accounts \
             WHERE role = 'student' \
               AND id = (SELECT account_id FROM student_profiles WHERE id = $1)",
        )
        .bind(profile_id)
        .execute(&self.pool)
        .await
        .map_err(AppError::database)?;

        Ok(result.rows_affected() > 0)
    }
}
