use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use campus_core::{AppError, ErrorResponse};
use campus_models::{ChangePasswordRequest, StudentProfileResponse, UpdateOwnContactDto};

use super::service::StudentSelfService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Get the signed-in student's profile
#[utoipa::path(
    get,
    path = "/api/students/me",
    responses(
        (status = 200, description = "Own profile", body = StudentProfileResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Student access required", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Student Self-Service"
)]
#[instrument(skip(state))]
pub async fn get_own_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<StudentProfileResponse>, AppError> {
    let profile = StudentSelfService::get_own_profile(state.store.as_ref(), auth_user.id).await?;
    Ok(Json(StudentProfileResponse { profile }))
}

/// Replace the signed-in student's contact details
#[utoipa::path(
    put,
    path = "/api/students/me",
    request_body = UpdateOwnContactDto,
    responses(
        (status = 200, description = "Contact replaced", body = StudentProfileResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Student Self-Service"
)]
#[instrument(skip(state, dto))]
pub async fn update_own_contact(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateOwnContactDto>,
) -> Result<Json<StudentProfileResponse>, AppError> {
    let profile =
        StudentSelfService::replace_contact(state.store.as_ref(), auth_user.id, dto.contact)
            .await?;
    Ok(Json(StudentProfileResponse { profile }))
}

/// Change the signed-in student's password
#[utoipa::path(
    put,
    path = "/api/students/me/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid current password", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Student Self-Service"
)]
#[instrument(skip(state, dto))]
pub async fn change_own_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    AuthService::change_password(state.store.as_ref(), auth_user.id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}
