//! Utility modules for the Campus API.
//!
//! - [`auth_helpers`]: Guards shared by the record controllers
//! - [`cookies`]: Session cookie construction and clearing

pub mod auth_helpers;
pub mod cookies;
