//! Student record models and DTOs.
//!
//! This module re-exports student models from the `campus-models` crate.

pub use campus_models::students::*;
pub use campus_models::StatusUpdateRequest;
