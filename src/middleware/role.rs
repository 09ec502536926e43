//! Role-based authorization for Axum
//!
//! Two approaches are provided:
//! 1. Layer-based gates (`require_academic`, `require_student`) applied with
//!    `axum::middleware::from_fn` inside the session layer
//! 2. The [`RequireAdministrative`] extractor and the `check_*` helpers for
//!    per-handler checks

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use campus_core::AppError;
use campus_models::AccountRole;

use crate::middleware::auth::AuthUser;

/// Fails with 403 "Forbidden" unless the user has `required` role.
pub fn check_role(auth_user: &AuthUser, required: AccountRole) -> Result<(), AppError> {
    if auth_user.role != required {
        debug!(user_id = %auth_user.id, role = %auth_user.role, required = %required, "Role gate denied");
        return Err(AppError::forbidden("Forbidden".to_string()));
    }
    Ok(())
}

/// Fails with 403 unless the user is an academic with the administrative sub-role.
pub fn check_administrative(auth_user: &AuthUser) -> Result<(), AppError> {
    if !auth_user.is_administrator() {
        return Err(AppError::forbidden(
            "Forbidden: Administrator access required".to_string(),
        ));
    }
    Ok(())
}

/// Gate for routes reserved to academic accounts.
///
/// # Example
///
/// ```rust,ignore
/// let routes = Router::new()
///     .route("/", get(handler))
///     .route_layer(middleware::from_fn(require_academic))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_academic(
    auth_user: AuthUser,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_role(&auth_user, AccountRole::Academic)?;
    Ok(next.run(req).await)
}

/// Gate for routes reserved to student accounts.
pub async fn require_student(
    auth_user: AuthUser,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    check_role(&auth_user, AccountRole::Student)?;
    Ok(next.run(req).await)
}

/// Extractor for administrator-only handlers.
///
/// ```rust,ignore
/// pub async fn delete_faculty(
///     RequireAdministrative(auth_user): RequireAdministrative,
///     IdPath(id): IdPath,
/// ) -> Result<StatusCode, AppError> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdministrative(pub AuthUser);

impl<S> FromRequestParts<S> for RequireAdministrative
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_administrative(&auth_user)?;
        Ok(RequireAdministrative(auth_user))
    }
}
