//! # Campus Auth
//!
//! Session tokens for the Campus API.
//!
//! - [`claims`]: the JWT claim set shared by access and refresh tokens
//! - [`jwt`]: issuing and verifying tokens
//!
//! Access tokens are short-lived and accompany every request; refresh tokens
//! only mint new pairs. Each kind is signed with its own secret.

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::{Claims, TokenKind};
pub use jwt::{
    TokenPair, issue_access_token, issue_refresh_token, issue_token_pair, ttl_for, verify_token,
};
