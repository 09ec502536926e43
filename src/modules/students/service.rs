use anyhow::anyhow;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use campus_core::{AppError, hash_password};
use campus_db::AccountStore;
use campus_models::{Account, AccountStatus, NewAccount};

use crate::metrics;
use crate::modules::students::model::{
    CreateStudentDto, StudentFilterParams, StudentProfile, StudentProfileChanges, StudentRecord,
    UpdateStudentDto,
};

fn student_not_found() -> AppError {
    AppError::not_found(anyhow!("Student not found"))
}

pub struct StudentService;

impl StudentService {
    #[instrument(skip(store))]
    pub async fn list_students(
        store: &dyn AccountStore,
        filter: &StudentFilterParams,
    ) -> Result<Vec<StudentRecord>, AppError> {
        let students = store.list_students(filter).await?;
        debug!(count = students.len(), "Listed students");
        Ok(students)
    }

    #[instrument(skip(store))]
    pub async fn get_student(
        store: &dyn AccountStore,
        profile_id: Uuid,
    ) -> Result<StudentRecord, AppError> {
        store
            .find_student(profile_id)
            .await?
            .ok_or_else(student_not_found)
    }

    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn create_student(
        store: &dyn AccountStore,
        dto: CreateStudentDto,
    ) -> Result<(Account, StudentProfile), AppError> {
        if store.find_account_by_email(&dto.email).await?.is_some() {
            return Err(AppError::email_taken());
        }

        let password_hash = hash_password(&dto.password)?;
        let profile = dto.profile();
        let (account, profile) = store
            .create_student_account(NewAccount::student(dto.email, password_hash), profile)
            .await?;

        metrics::track_account_created(account.role.as_str());
        info!(account_id = %account.id, profile_id = %profile.id, "Student created");

        Ok((account, profile))
    }

    #[instrument(skip(store, dto))]
    pub async fn update_student(
        store: &dyn AccountStore,
        profile_id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<StudentProfile, AppError> {
        // Profiles owned by non-student accounts are not addressable here.
        if store.find_student(profile_id).await?.is_none() {
            return Err(student_not_found());
        }

        store
            .update_student_profile(profile_id, StudentProfileChanges::from(dto))
            .await?
            .ok_or_else(student_not_found)
    }

    #[instrument(skip(store))]
    pub async fn set_student_status(
        store: &dyn AccountStore,
        profile_id: Uuid,
        status: AccountStatus,
    ) -> Result<(), AppError> {
        if !store.set_student_status(profile_id, status).await? {
            return Err(student_not_found());
        }
        info!(profile_id = %profile_id, ?status, "Student status updated");
        Ok(())
    }

    #[instrument(skip(store))]
    pub async fn delete_student(store: &dyn AccountStore, profile_id: Uuid) -> Result<(), AppError> {
        if !store.delete_student(profile_id).await? {
            return Err(student_not_found());
        }
        info!(profile_id = %profile_id, "Student deleted");
        Ok(())
    }
}
