use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use campus_core::{AppError, ErrorResponse};
use campus_models::AccountSummary;

use super::model::{
    CreateStudentDto, CreatedStudentResponse, StatusUpdateRequest, StudentFilterParams,
    StudentListResponse, StudentProfileResponse, StudentRecordResponse, UpdateStudentDto,
};
use super::service::StudentService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdministrative;
use crate::state::AppState;
use crate::validator::{IdPath, ValidatedJson, ValidatedQuery};

/// List student records
#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "Students matching the filters, newest first", body = StudentListResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Academic access required", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    ValidatedQuery(filter): ValidatedQuery<StudentFilterParams>,
) -> Result<Json<StudentListResponse>, AppError> {
    let students = StudentService::list_students(state.store.as_ref(), &filter).await?;
    Ok(Json(StudentListResponse { students }))
}

/// Get a student record by profile id
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student profile id")),
    responses(
        (status = 200, description = "Student record", body = StudentRecordResponse),
        (status = 400, description = "Invalid ID format", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<StudentRecordResponse>, AppError> {
    let profile = StudentService::get_student(state.store.as_ref(), id).await?;
    Ok(Json(StudentRecordResponse { profile }))
}

/// Create a student account with its profile
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = CreatedStudentResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 409, description = "Email already exists", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, admin, dto), fields(admin_id = %admin.id))]
pub async fn create_student(
    RequireAdministrative(admin): RequireAdministrative,
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<CreatedStudentResponse>), AppError> {
    let (account, profile) = StudentService::create_student(state.store.as_ref(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedStudentResponse {
            user: AccountSummary::from(&account),
            profile,
        }),
    ))
}

/// Update a student profile
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student profile id")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Profile updated", body = StudentProfileResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, admin, dto), fields(admin_id = %admin.id))]
pub async fn update_student(
    RequireAdministrative(admin): RequireAdministrative,
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<StudentProfileResponse>, AppError> {
    let profile = StudentService::update_student(state.store.as_ref(), id, dto).await?;
    Ok(Json(StudentProfileResponse { profile }))
}

/// Activate or deactivate a student account
#[utoipa::path(
    patch,
    path = "/api/students/{id}/status",
    params(("id" = Uuid, Path, description = "Student profile id")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 204, description = "Status updated"),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, auth_user, dto), fields(actor_id = %auth_user.id))]
pub async fn update_student_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(dto): ValidatedJson<StatusUpdateRequest>,
) -> Result<StatusCode, AppError> {
    StudentService::set_student_status(state.store.as_ref(), id, dto.status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a student account and its profile
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student profile id")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("cookie_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn delete_student(
    RequireAdministrative(admin): RequireAdministrative,
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    StudentService::delete_student(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
