//! Faculty models and DTOs.
//!
//! This module re-exports faculty models from the `campus-models` crate.

pub use campus_models::StatusUpdateRequest;
pub use campus_models::faculty::*;
