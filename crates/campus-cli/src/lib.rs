//! # Campus CLI
//!
//! Operator tooling for the Campus API: bootstrapping the first administrator
//! and filling a development database with fake faculty and students.
//!
//! ## Usage
//!
//! ```ignore
//! use campus_cli::seeder::{SeedConfig, seed_all};
//!
//! let config = SeedConfig::default().with_students(200);
//! seed_all(&store, &config).await?;
//! ```

pub mod admin;
pub mod seeder;
