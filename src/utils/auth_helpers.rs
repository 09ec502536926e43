use campus_core::AppError;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;

/// Rejects an administrator acting on their own account.
pub fn forbid_self_action(auth_user: &AuthUser, target: Uuid, message: &str) -> Result<(), AppError> {
    if auth_user.id == target {
        return Err(AppError::forbidden(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_models::{AccountRole, SubRole};

    #[test]
    fn test_forbid_self_action() {
        let auth_user = AuthUser {
            id: Uuid::new_v4(),
            role: AccountRole::Academic,
            sub_role: Some(SubRole::Administrative),
        };

        let err = forbid_self_action(&auth_user, auth_user.id, "Cannot delete your own account")
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
        assert_eq!(err.error.to_string(), "Cannot delete your own account");

        assert!(forbid_self_action(&auth_user, Uuid::new_v4(), "nope").is_ok());
    }
}
