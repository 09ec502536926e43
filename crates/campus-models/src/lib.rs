//! # Campus Models
//!
//! Domain models and DTOs for the Campus API.
//!
//! # Modules
//!
//! - [`accounts`]: Accounts, roles, statuses and the sanitized account views
//! - [`auth`]: Login, registration, password and profile DTOs
//! - [`faculty`]: Faculty management DTOs
//! - [`students`]: Student profiles and student management DTOs
//! - [`validation`]: Custom field validators
//!
//! # Example
//!
//! ```ignore
//! use campus_models::accounts::{Account, AccountView};
//!
//! let view = AccountView::from(&account);
//! ```

pub mod accounts;
pub mod auth;
pub mod faculty;
pub mod students;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use accounts::{
    Account, AccountChanges, AccountContact, AccountRole, AccountStatus, AccountSummary,
    AccountView, NewAccount, StatusUpdateRequest, SubRole,
};

pub use auth::{
    AcademicSignup, ChangePasswordRequest, LoginRequest, RegisterRequest, RegisterResponse,
    StudentSignup, UpdateProfileRequest, UserResponse,
};

pub use faculty::{
    CreateFacultyDto, FacultyFilterParams, FacultyListResponse, FacultyResponse, UpdateFacultyDto,
};

pub use students::{
    CreateStudentDto, CreatedStudentResponse, NewStudentProfile, StudentContact,
    StudentFilterParams, StudentListResponse, StudentProfile, StudentProfileChanges,
    StudentProfileResponse, StudentRecord, StudentRecordResponse, UpdateOwnContactDto,
    UpdateStudentDto,
};
