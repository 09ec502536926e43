pub mod auth;
pub mod faculty;
pub mod health;
pub mod student_self;
pub mod students;
