//! Data models for database seeding configuration.

use chrono::NaiveDate;
use campus_models::SubRole;

/// Seed data for an academic account.
#[derive(Debug, Clone)]
pub struct FacultySeed {
    pub email: String,
    pub name: String,
    pub sub_role: SubRole,
    pub department: String,
}

/// Seed data for a student account and its profile.
#[derive(Debug, Clone)]
pub struct StudentSeed {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: Option<NaiveDate>,
    pub department: String,
    pub year: i16,
}

/// How many accounts of each kind to generate.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub administrators: usize,
    pub faculty: usize,
    pub students: usize,
    /// Shared plain-text password of every seeded account.
    pub password: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            administrators: 2,
            faculty: 10,
            students: 100,
            password: super::DEFAULT_SEED_PASSWORD.to_string(),
        }
    }
}

impl SeedConfig {
    pub fn with_administrators(mut self, administrators: usize) -> Self {
        self.administrators = administrators;
        self
    }

    pub fn with_faculty(mut self, faculty: usize) -> Self {
        self.faculty = faculty;
        self
    }

    pub fn with_students(mut self, students: usize) -> Self {
        self.students = students;
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn total_accounts(&self) -> usize {
        self.administrators + self.faculty + self.students
    }
}

/// Counts of what a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub academics: usize,
    pub students: usize,
}
