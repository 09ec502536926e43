use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};
use uuid::Uuid;

use campus_auth::{TokenKind, verify_token};
use campus_core::AppError;
use campus_models::{AccountRole, SubRole};

use crate::state::AppState;
use crate::utils::cookies::ACCESS_COOKIE;

/// Identity attached to a request by [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: AccountRole,
    pub sub_role: Option<SubRole>,
}

impl AuthUser {
    pub fn is_academic(&self) -> bool {
        self.role == AccountRole::Academic
    }

    pub fn is_administrator(&self) -> bool {
        self.is_academic() && self.sub_role == Some(SubRole::Administrative)
    }
}

/// Reads the identity inserted by [`require_auth`]. Routes without the session
/// layer reject with 401.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Unauthorized: No token provided".to_string()))
    }
}

/// Session middleware.
///
/// Validates the `access_token` cookie, loads the account and rejects inactive
/// accounts before attaching an [`AuthUser`] to the request and its response.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(ACCESS_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::unauthorized("Unauthorized: No token provided".to_string()))?;

    let account_id = verify_token(&token, TokenKind::Access, &state.jwt_config)
        .ok()
        .and_then(|claims| claims.account_id())
        .ok_or_else(|| {
            debug!("Rejected access token");
            AppError::unauthorized("Unauthorized: Invalid token".to_string())
        })?;

    let account = state
        .store
        .find_account_by_id(account_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("Unauthorized: User not found".to_string()))?;

    if !account.is_active() {
        warn!(account_id = %account.id, "Inactive account attempted access");
        return Err(AppError::forbidden(
            "Forbidden: Account is inactive".to_string(),
        ));
    }

    let auth_user = AuthUser {
        id: account.id,
        role: account.role,
        sub_role: account.sub_role,
    };
    req.extensions_mut().insert(auth_user.clone());

    // Echoed on the response for the request log.
    let mut response = next.run(req).await;
    response.extensions_mut().insert(auth_user);
    Ok(response)
}
