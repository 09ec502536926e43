//! # Campus Core
//!
//! Core types, errors, and utilities for the Campus API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Email normalization helpers used while deserializing requests
//!
//! # Example
//!
//! ```ignore
//! use campus_core::errors::AppError;
//! use campus_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//! let hash = hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse, FieldError};
pub use password::{hash_password, verify_password};
