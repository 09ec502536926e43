use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, ErrorResponse};
use campus_models::AccountView;

use super::model::{
    CreateFacultyDto, FacultyFilterParams, FacultyListResponse, FacultyResponse,
    StatusUpdateRequest, UpdateFacultyDto,
};
use super::service::FacultyService;
use crate::middleware::role::RequireAdministrative;
use crate::state::AppState;
use crate::validator::{IdPath, ValidatedJson, ValidatedQuery};

/// List faculty members
#[utoipa::path(
    get,
    path = "/api/faculty",
    params(FacultyFilterParams),
    responses(
        (status = 200, description = "Faculty matching the filters, newest first", body = FacultyListResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Academic access required", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Faculty"
)]
#[instrument(skip(state))]
pub async fn get_faculty(
    State(state): State<AppState>,
    ValidatedQuery(filter): ValidatedQuery<FacultyFilterParams>,
) -> Result<Json<FacultyListResponse>, AppError> {
    let faculty = FacultyService::list_faculty(state.store.as_ref(), &filter)
        .await?
        .into_iter()
        .map(AccountView::from)
        .collect();
    Ok(Json(FacultyListResponse { faculty }))
}

/// Get a faculty member by account id
#[utoipa::path(
    get,
    path = "/api/faculty/{id}",
    params(("id" = Uuid, Path, description = "Faculty account id")),
    responses(
        (status = 200, description = "Faculty member", body = FacultyResponse),
        (status = 400, description = "Invalid ID format", body = ErrorResponse),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Faculty"
)]
#[instrument(skip(state))]
pub async fn get_faculty_member(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<FacultyResponse>, AppError> {
    let account = FacultyService::get_faculty(state.store.as_ref(), id).await?;
    Ok(Json(FacultyResponse {
        faculty: AccountView::from(account),
    }))
}

/// Create a faculty or administrative account
#[utoipa::path(
    post,
    path = "/api/faculty",
    request_body = CreateFacultyDto,
    responses(
        (status = 201, description = "Faculty member created", body = FacultyResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Faculty"
)]
#[instrument(skip(state, admin, dto), fields(admin_id = %admin.id))]
pub async fn create_faculty(
    RequireAdministrative(admin): RequireAdministrative,
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateFacultyDto>,
) -> Result<(StatusCode, Json<FacultyResponse>), AppError> {
    let account = FacultyService::create_faculty(state.store.as_ref(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(FacultyResponse {
            faculty: AccountView::from(account),
        }),
    ))
}

/// Update a faculty member
///
/// Empty `department` or `avatarUrl` values clear the field.
#[utoipa::path(
    put,
    path = "/api/faculty/{id}",
    params(("id" = Uuid, Path, description = "Faculty account id")),
    request_body = UpdateFacultyDto,
    responses(
        (status = 200, description = "Faculty member updated", body = FacultyResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Administrator access required or own subRole change", body = ErrorResponse),
        (status = 404, description = "Faculty not found", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Faculty"
)]
#[instrument(skip(state, admin, dto), fields(admin_id = %admin.id))]
pub async fn update_faculty(
    RequireAdministrative(admin): RequireAdministrative,
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(dto): ValidatedJson<UpdateFacultyDto>,
) -> Result<Json<FacultyResponse>, AppError> {
    let account = FacultyService::update_faculty(state.store.as_ref(), &admin, id, dto).await?;
    Ok(Json(FacultyResponse {
        faculty: AccountView::from(account),
    }))
}

/// Activate or deactivate a faculty account
#[utoipa::path(
    patch,
    path = "/api/faculty/{id}/status",
    params(("id" = Uuid, Path, description = "Faculty account id")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 204, description = "Status updated"),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Administrator access required or own account", body = ErrorResponse),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Faculty"
)]
#[instrument(skip(state, admin, dto), fields(admin_id = %admin.id))]
pub async fn update_faculty_status(
    RequireAdministrative(admin): RequireAdministrative,
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(dto): ValidatedJson<StatusUpdateRequest>,
) -> Result<StatusCode, AppError> {
    FacultyService::set_faculty_status(state.store.as_ref(), &admin, id, dto.status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a faculty account
#[utoipa::path(
    delete,
    path = "/api/faculty/{id}",
    params(("id" = Uuid, Path, description = "Faculty account id")),
    responses(
        (status = 204, description = "Faculty member deleted"),
        (status = 403, description = "Administrator access required or own account", body = ErrorResponse),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Faculty"
)]
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn delete_faculty(
    RequireAdministrative(admin): RequireAdministrative,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    FacultyService::delete_faculty(state.store.as_ref(), &admin, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
