//! # Campus Config
//!
//! Configuration types for the Campus API, loaded from environment variables:
//!
//! - [`jwt`]: token secrets and lifetimes
//! - [`cors`]: the allowed browser origin
//! - [`rate_limit`]: per-IP rate limiting
//! - [`server`]: listen port, environment and body limit
//!
//! # Example
//!
//! ```ignore
//! use campus_config::{CorsConfig, JwtConfig, RateLimitConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let rate_limit_config = RateLimitConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod rate_limit;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;
