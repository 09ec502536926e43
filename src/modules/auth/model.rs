//! Authentication DTOs.
//!
//! This module re-exports the auth models from the `campus-models` crate.

pub use campus_models::auth::*;
