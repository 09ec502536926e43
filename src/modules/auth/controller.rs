use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;

use campus_core::{AppError, ErrorResponse};
use campus_models::AccountView;

use super::model::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, RegisterResponse, UpdateProfileRequest,
    UserResponse,
};
use super::service::AuthService;
use crate::metrics;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::cookies::{REFRESH_COOKIE, clear_session_cookies, set_session_cookies};
use crate::validator::ValidatedJson;

/// Register a student or academic account and start a session
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered, session cookies set", body = RegisterResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<RegisterResponse>), AppError> {
    let (account, profile) = AuthService::register(state.store.as_ref(), dto).await?;
    let pair = AuthService::issue_session(&account, &state.jwt_config)?;
    let jar = set_session_cookies(jar, &pair, &state.jwt_config, &state.server_config);

    Ok((
        StatusCode::CREATED,
        jar,
        Json(RegisterResponse {
            user: AccountView::from(account),
            profile,
            message: "Registration successful".to_string(),
        }),
    ))
}

/// Login with email, password and the expected role
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookies set", body = UserResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Role mismatch", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>), AppError> {
    let account = AuthService::login(state.store.as_ref(), dto).await?;
    let pair = AuthService::issue_session(&account, &state.jwt_config)?;
    let jar = set_session_cookies(jar, &pair, &state.jwt_config, &state.server_config);

    Ok((
        jar,
        Json(UserResponse {
            user: AccountView::from(account),
        }),
    ))
}

/// Rotate the session using the refresh token cookie
///
/// Any failure clears both session cookies.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "Session rotated", body = UserResponse),
        (status = 401, description = "Missing, invalid or expired refresh token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Response {
    let token = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());

    match AuthService::refresh(state.store.as_ref(), token.as_deref(), &state.jwt_config).await {
        Ok((account, pair)) => {
            metrics::track_refresh(true);
            let jar = set_session_cookies(jar, &pair, &state.jwt_config, &state.server_config);
            (
                jar,
                Json(UserResponse {
                    user: AccountView::from(account),
                }),
            )
                .into_response()
        }
        Err(err) => {
            metrics::track_refresh(false);
            (clear_session_cookies(jar, &state.server_config), err).into_response()
        }
    }
}

/// Clear the session cookies
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cookies cleared")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (StatusCode, CookieJar) {
    (
        StatusCode::NO_CONTENT,
        clear_session_cookies(jar, &state.server_config),
    )
}

/// Get the signed-in account
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Account is inactive", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let account = AuthService::get_account(state.store.as_ref(), auth_user.id).await?;
    Ok(Json(UserResponse {
        user: AccountView::from(account),
    }))
}

/// Change the signed-in account's password
#[utoipa::path(
    put,
    path = "/api/auth/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid current password", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    AuthService::change_password(state.store.as_ref(), auth_user.id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Update the signed-in account's profile fields
#[utoipa::path(
    put,
    path = "/api/auth/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error or field not allowed for the role", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let account = AuthService::update_profile(state.store.as_ref(), auth_user.id, dto).await?;
    Ok(Json(UserResponse {
        user: AccountView::from(account),
    }))
}
