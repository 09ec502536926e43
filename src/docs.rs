use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use campus_core::{ErrorResponse, FieldError};
use campus_models::{
    AcademicSignup, AccountContact, AccountRole, AccountStatus, AccountSummary, AccountView,
    ChangePasswordRequest, CreateFacultyDto, CreateStudentDto, CreatedStudentResponse,
    FacultyListResponse, FacultyResponse, LoginRequest, RegisterRequest, RegisterResponse,
    StatusUpdateRequest, StudentContact, StudentListResponse, StudentProfile,
    StudentProfileResponse, StudentRecord, StudentRecordResponse, StudentSignup, SubRole,
    UpdateFacultyDto, UpdateOwnContactDto, UpdateProfileRequest, UpdateStudentDto, UserResponse,
};

use crate::modules::health::controller::HealthResponse;
use crate::utils::cookies::ACCESS_COOKIE;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::get_me,
        crate::modules::auth::controller::change_password,
        crate::modules::auth::controller::update_profile,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::update_student_status,
        crate::modules::students::controller::delete_student,
        crate::modules::student_self::controller::get_own_profile,
        crate::modules::student_self::controller::update_own_contact,
        crate::modules::student_self::controller::change_own_password,
        crate::modules::faculty::controller::get_faculty,
        crate::modules::faculty::controller::get_faculty_member,
        crate::modules::faculty::controller::create_faculty,
        crate::modules::faculty::controller::update_faculty,
        crate::modules::faculty::controller::update_faculty_status,
        crate::modules::faculty::controller::delete_faculty,
    ),
    components(
        schemas(
            AccountRole,
            SubRole,
            AccountStatus,
            AccountContact,
            AccountView,
            AccountSummary,
            LoginRequest,
            RegisterRequest,
            StudentSignup,
            AcademicSignup,
            RegisterResponse,
            UserResponse,
            ChangePasswordRequest,
            UpdateProfileRequest,
            StatusUpdateRequest,
            StudentContact,
            StudentProfile,
            StudentRecord,
            CreateStudentDto,
            UpdateStudentDto,
            UpdateOwnContactDto,
            StudentListResponse,
            StudentRecordResponse,
            StudentProfileResponse,
            CreatedStudentResponse,
            CreateFacultyDto,
            UpdateFacultyDto,
            FacultyListResponse,
            FacultyResponse,
            HealthResponse,
            ErrorResponse,
            FieldError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, registration and session endpoints"),
        (name = "Students", description = "Student record management for academic staff"),
        (name = "Student Self-Service", description = "Endpoints a student uses on their own profile"),
        (name = "Faculty", description = "Faculty and administrator account management"),
        (name = "Health", description = "Service liveness")
    ),
    info(
        title = "Campus API",
        version = "0.1.0",
        description = "College administration portal API built with Rust, Axum and PostgreSQL. Sessions travel in httpOnly cookies.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(ACCESS_COOKIE))),
            )
        }
    }
}
