//! Routes a signed-in student uses to read and maintain their own profile.

pub mod controller;
pub mod router;
pub mod service;
