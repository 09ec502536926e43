use anyhow::anyhow;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use campus_auth::{TokenKind, TokenPair, issue_token_pair, verify_token};
use campus_config::JwtConfig;
use campus_core::{AppError, hash_password, verify_password};
use campus_db::AccountStore;
use campus_models::{
    Account, AccountChanges, AccountContact, AccountRole, NewAccount, StudentProfile,
};

use super::model::{ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::metrics;

pub struct AuthService;

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials".to_string()).with_code("INVALID_CREDENTIALS")
}

fn invalid_refresh() -> AppError {
    AppError::unauthorized("Invalid refresh token".to_string())
}

/// Overlays the provided contact fields on the stored ones.
fn merge_contact(current: &AccountContact, update: AccountContact) -> AccountContact {
    AccountContact {
        phone: update.phone.or_else(|| current.phone.clone()),
        address: update.address.or_else(|| current.address.clone()),
    }
}

impl AuthService {
    /// Mints a fresh access/refresh pair for `account`.
    pub fn issue_session(account: &Account, jwt_config: &JwtConfig) -> Result<TokenPair, AppError> {
        let pair = issue_token_pair(account.id, account.role, jwt_config)?;
        metrics::track_tokens_issued();
        Ok(pair)
    }

    #[instrument(skip(store, dto), fields(email = %dto.email(), role = %dto.role()))]
    pub async fn register(
        store: &dyn AccountStore,
        dto: RegisterRequest,
    ) -> Result<(Account, Option<StudentProfile>), AppError> {
        if store.find_account_by_email(dto.email()).await?.is_some() {
            debug!("Registration rejected, email already exists");
            return Err(AppError::email_taken());
        }

        let password_hash = hash_password(dto.password())?;

        let (account, profile) = match dto {
            RegisterRequest::Student(signup) => {
                let profile = signup.profile();
                let (account, profile) = store
                    .create_student_account(NewAccount::student(signup.email, password_hash), profile)
                    .await?;
                (account, Some(profile))
            }
            RegisterRequest::Academic(signup) => {
                let account = store.create_account(signup.account(password_hash)).await?;
                (account, None)
            }
        };

        metrics::track_registration(account.role.as_str());
        info!(account_id = %account.id, "Account registered");

        Ok((account, profile))
    }

    /// Authenticates `dto` against the store.
    ///
    /// The role is compared before the password, so a role mismatch is reported as
    /// 403 `ROLE_MISMATCH` even when the password is wrong.
    #[instrument(skip(store, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn login(store: &dyn AccountStore, dto: LoginRequest) -> Result<Account, AppError> {
        let Some(account) = store.find_account_by_email(&dto.email).await? else {
            metrics::track_login_failure("unknown_account");
            return Err(invalid_credentials());
        };

        if !account.is_active() {
            metrics::track_login_failure("inactive");
            return Err(invalid_credentials());
        }

        if account.role != dto.role {
            metrics::track_login_failure("role_mismatch");
            return Err(
                AppError::forbidden("Invalid credentials".to_string()).with_code("ROLE_MISMATCH"),
            );
        }

        if !verify_password(&dto.password, &account.password_hash)? {
            metrics::track_login_failure("bad_password");
            return Err(invalid_credentials());
        }

        metrics::track_login_success(account.role.as_str());
        info!(account_id = %account.id, "Login successful");

        Ok(account)
    }

    /// Validates a refresh token and rotates the session.
    #[instrument(skip_all)]
    pub async fn refresh(
        store: &dyn AccountStore,
        token: Option<&str>,
        jwt_config: &JwtConfig,
    ) -> Result<(Account, TokenPair), AppError> {
        let token = token.filter(|t| !t.is_empty()).ok_or_else(|| {
            AppError::unauthorized("Missing refresh token".to_string())
        })?;

        let account_id = verify_token(token, TokenKind::Refresh, jwt_config)
            .ok()
            .and_then(|claims| claims.account_id())
            .ok_or_else(invalid_refresh)?;

        let account = store
            .find_account_by_id(account_id)
            .await?
            .filter(Account::is_active)
            .ok_or_else(|| {
                warn!(account_id = %account_id, "Refresh for missing or inactive account");
                invalid_refresh()
            })?;

        let pair = Self::issue_session(&account, jwt_config)?;
        Ok((account, pair))
    }

    #[instrument(skip(store))]
    pub async fn get_account(store: &dyn AccountStore, id: Uuid) -> Result<Account, AppError> {
        store
            .find_account_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(store, dto))]
    pub async fn change_password(
        store: &dyn AccountStore,
        id: Uuid,
        dto: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let account = Self::get_account(store, id).await?;

        if !verify_password(&dto.current_password, &account.password_hash)? {
            return Err(AppError::unauthorized(
                "Invalid current password".to_string(),
            ));
        }

        let password_hash = hash_password(&dto.new_password)?;
        if !store.update_password(id, &password_hash).await? {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        info!(account_id = %id, "Password changed");
        Ok(())
    }

    /// Partial update of the signed-in account. Name and department belong to
    /// academic accounts only.
    #[instrument(skip(store, dto))]
    pub async fn update_profile(
        store: &dyn AccountStore,
        id: Uuid,
        dto: UpdateProfileRequest,
    ) -> Result<Account, AppError> {
        let account = Self::get_account(store, id).await?;

        if account.role == AccountRole::Student && (dto.name.is_some() || dto.department.is_some()) {
            return Err(AppError::bad_request(anyhow!(
                "Name and department can only be set on academic accounts"
            )));
        }

        if let Some(email) = &dto.email
            && let Some(existing) = store.find_account_by_email(email).await?
            && existing.id != id
        {
            return Err(AppError::email_taken());
        }

        let changes = AccountChanges {
            email: dto.email,
            sub_role: None,
            name: dto.name.map(|name| Some(name.trim().to_string())),
            avatar_url: dto.avatar_url.map(Some),
            department: dto.department.map(Some),
            contact: dto.contact.map(|c| merge_contact(&account.contact, c)),
        };

        store
            .update_account(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_contact_keeps_unspecified_fields() {
        let current = AccountContact {
            phone: Some("+1 555 0100".into()),
            address: Some("1 Campus Way".into()),
        };
        let merged = merge_contact(
            &current,
            AccountContact {
                phone: Some("+1 555 0199".into()),
                address: None,
            },
        );
        assert_eq!(merged.phone.as_deref(), Some("+1 555 0199"));
        assert_eq!(merged.address.as_deref(), Some("1 Campus Way"));
    }

    #[test]
    fn test_invalid_credentials_shape() {
        let err = invalid_credentials();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.code, Some("INVALID_CREDENTIALS"));
        assert_eq!(err.error.to_string(), "Invalid credentials");
    }
}
