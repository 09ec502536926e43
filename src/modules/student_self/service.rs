use anyhow::anyhow;
use tracing::{info, instrument};
use uuid::Uuid;

use campus_core::AppError;
use campus_db::AccountStore;
use campus_models::{StudentContact, StudentProfile, StudentProfileChanges};

fn profile_not_found() -> AppError {
    AppError::not_found(anyhow!("Profile not found"))
}

pub struct StudentSelfService;

impl StudentSelfService {
    #[instrument(skip(store))]
    pub async fn get_own_profile(
        store: &dyn AccountStore,
        account_id: Uuid,
    ) -> Result<StudentProfile, AppError> {
        store
            .find_profile_by_account(account_id)
            .await?
            .ok_or_else(profile_not_found)
    }

    /// Replaces the whole contact block of the caller's profile.
    #[instrument(skip(store, contact))]
    pub async fn replace_contact(
        store: &dyn AccountStore,
        account_id: Uuid,
        contact: StudentContact,
    ) -> Result<StudentProfile, AppError> {
        let profile = Self::get_own_profile(store, account_id).await?;

        let changes = StudentProfileChanges {
            contact: Some(contact),
            ..Default::default()
        };
        let updated = store
            .update_student_profile(profile.id, changes)
            .await?
            .ok_or_else(profile_not_found)?;

        info!(profile_id = %updated.id, "Student contact updated");
        Ok(updated)
    }
}
