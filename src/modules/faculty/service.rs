use anyhow::anyhow;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use campus_core::{AppError, hash_password};
use campus_db::AccountStore;
use campus_models::{Account, AccountChanges, AccountRole, AccountStatus, NewAccount};

use crate::metrics;
use crate::middleware::auth::AuthUser;
use crate::modules::faculty::model::{CreateFacultyDto, FacultyFilterParams, UpdateFacultyDto};
use crate::utils::auth_helpers::forbid_self_action;

fn faculty_not_found() -> AppError {
    AppError::not_found(anyhow!("Faculty not found"))
}

pub struct FacultyService;

impl FacultyService {
    /// Loads an account only if it is an academic account.
    async fn find_academic(store: &dyn AccountStore, id: Uuid) -> Result<Account, AppError> {
        store
            .find_account_by_id(id)
            .await?
            .filter(|account| account.role == AccountRole::Academic)
            .ok_or_else(faculty_not_found)
    }

    #[instrument(skip(store))]
    pub async fn list_faculty(
        store: &dyn AccountStore,
        filter: &FacultyFilterParams,
    ) -> Result<Vec<Account>, AppError> {
        let faculty = store.list_faculty(filter).await?;
        debug!(count = faculty.len(), "Listed faculty");
        Ok(faculty)
    }

    #[instrument(skip(store))]
    pub async fn get_faculty(store: &dyn AccountStore, id: Uuid) -> Result<Account, AppError> {
        Self::find_academic(store, id).await
    }

    #[instrument(skip(store, dto), fields(email = %dto.email, sub_role = %dto.sub_role.as_str()))]
    pub async fn create_faculty(
        store: &dyn AccountStore,
        dto: CreateFacultyDto,
    ) -> Result<Account, AppError> {
        if store.find_account_by_email(&dto.email).await?.is_some() {
            return Err(AppError::email_taken());
        }

        let password_hash = hash_password(&dto.password)?;
        let new_account =
            NewAccount::academic(dto.email, password_hash, dto.sub_role, dto.name.trim().to_string())
                .with_department(dto.department)
                .with_avatar_url(dto.avatar_url)
                .with_contact(dto.contact);

        let account = store.create_account(new_account).await?;

        metrics::track_account_created(account.role.as_str());
        info!(account_id = %account.id, "Faculty member created");

        Ok(account)
    }

    /// Partial update. An administrator may edit their own record but not their
    /// own sub-role.
    #[instrument(skip(store, dto), fields(actor_id = %actor.id))]
    pub async fn update_faculty(
        store: &dyn AccountStore,
        actor: &AuthUser,
        id: Uuid,
        dto: UpdateFacultyDto,
    ) -> Result<Account, AppError> {
        if dto.sub_role.is_some() {
            forbid_self_action(actor, id, "Cannot change your own subRole")?;
        }

        Self::find_academic(store, id).await?;

        if let Some(email) = &dto.email
            && let Some(existing) = store.find_account_by_email(email).await?
            && existing.id != id
        {
            return Err(AppError::email_taken());
        }

        let account = store
            .update_account(id, AccountChanges::from(dto))
            .await?
            .ok_or_else(faculty_not_found)?;

        info!(account_id = %account.id, "Faculty member updated");
        Ok(account)
    }

    #[instrument(skip(store), fields(actor_id = %actor.id))]
    pub async fn set_faculty_status(
        store: &dyn AccountStore,
        actor: &AuthUser,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<(), AppError> {
        forbid_self_action(actor, id, "Cannot change your own status")?;

        Self::find_academic(store, id).await?;

        if !store.set_account_status(id, status).await? {
            return Err(faculty_not_found());
        }

        info!(account_id = %id, ?status, "Faculty status updated");
        Ok(())
    }

    #[instrument(skip(store), fields(actor_id = %actor.id))]
    pub async fn delete_faculty(
        store: &dyn AccountStore,
        actor: &AuthUser,
        id: Uuid,
    ) -> Result<(), AppError> {
        forbid_self_action(actor, id, "Cannot delete your own account")?;

        Self::find_academic(store, id).await?;

        if !store.delete_account(id).await? {
            return Err(faculty_not_found());
        }

        info!(account_id = %id, "Faculty member deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_db::MemoryAccountStore;
    use campus_models::SubRole;

    fn admin(id: Uuid) -> AuthUser {
        AuthUser {
            id,
            role: AccountRole::Academic,
            sub_role: Some(SubRole::Administrative),
        }
    }

    async fn seed_faculty(store: &MemoryAccountStore, email: &str) -> Account {
        store
            .create_account(NewAccount::academic(
                email.to_string(),
                "$2b$04$placeholder".to_string(),
                SubRole::Faculty,
                "Fay Culty".to_string(),
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_self_status_change_is_forbidden_before_lookup() {
        let store = MemoryAccountStore::default();
        let actor = admin(Uuid::new_v4());

        let err = FacultyService::set_faculty_status(&store, &actor, actor.id, AccountStatus::Inactive)
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
    }

    #[tokio::test]
    async fn test_own_sub_role_change_is_forbidden() {
        let store = MemoryAccountStore::default();
        let me = seed_faculty(&store, "me@college.edu").await;
        let actor = admin(me.id);

        let err = FacultyService::update_faculty(
            &store,
            &actor,
            me.id,
            UpdateFacultyDto {
                sub_role: Some(SubRole::Faculty),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
        assert_eq!(err.error.to_string(), "Cannot change your own subRole");
    }

    #[tokio::test]
    async fn test_own_record_update_without_sub_role_is_allowed() {
        let store = MemoryAccountStore::default();
        let me = seed_faculty(&store, "me@college.edu").await;
        let actor = admin(me.id);

        let updated = FacultyService::update_faculty(
            &store,
            &actor,
            me.id,
            UpdateFacultyDto {
                department: Some(String::new()),
                name: Some("New Name".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name.as_deref(), Some("New Name"));
        assert_eq!(updated.department, None);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let store = MemoryAccountStore::default();
        let target = seed_faculty(&store, "target@college.edu").await;
        seed_faculty(&store, "taken@college.edu").await;

        let err = FacultyService::update_faculty(
            &store,
            &admin(Uuid::new_v4()),
            target.id,
            UpdateFacultyDto {
                email: Some("taken@college.edu".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status.as_u16(), 409);
    }

    #[tokio::test]
    async fn test_student_accounts_are_not_faculty() {
        let store = MemoryAccountStore::default();
        let student = store
            .create_account(NewAccount::student(
                "stu@college.edu".to_string(),
                "$2b$04$placeholder".to_string(),
            ))
            .await
            .unwrap();

        let err = FacultyService::get_faculty(&store, student.id).await.unwrap_err();
        assert_eq!(err.status.as_u16(), 404);
        assert_eq!(err.error.to_string(), "Faculty not found");

        let err = FacultyService::delete_faculty(&store, &admin(Uuid::new_v4()), student.id)
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 404);
    }
}
