//! Middleware modules for request processing.
//!
//! - [`auth`]: Session middleware and the `AuthUser` extractor
//! - [`role`]: Role gates and the administrative sub-role extractor
//! - [`security`]: Security headers and the request size guard
//!
//! # Authentication Flow
//!
//! 1. Client sends request with the `access_token` httpOnly cookie
//! 2. `require_auth` verifies the token, loads the account and rejects inactive accounts
//! 3. The route's role gate checks the account role
//! 4. Handlers take `AuthUser` or `RequireAdministrative` as needed
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::role::RequireAdministrative;
//!
//! async fn me(auth_user: AuthUser) -> impl IntoResponse {
//!     // any authenticated account
//! }
//!
//! async fn create_faculty(
//!     RequireAdministrative(admin): RequireAdministrative,
//! ) -> impl IntoResponse {
//!     // academic + administrative only
//! }
//! ```

pub mod auth;
pub mod role;
pub mod security;
