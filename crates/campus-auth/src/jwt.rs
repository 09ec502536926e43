//! Token issuance and verification.
//!
//! Access and refresh tokens are HS256 JWTs signed with separate secrets and
//! lifetimes from [`JwtConfig`]. Verification fails closed: a bad signature, an
//! expired token, a malformed token or a token of the wrong kind are all rejected.
//!
//! # Example
//!
//! ```ignore
//! use campus_auth::{TokenKind, issue_token_pair, verify_token};
//!
//! let pair = issue_token_pair(account_id, AccountRole::Student, &config)?;
//! let claims = verify_token(&pair.access_token, TokenKind::Access, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use campus_config::JwtConfig;
use campus_core::AppError;
use campus_models::AccountRole;

use crate::claims::{Claims, TokenKind};

/// A freshly minted access/refresh token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

fn secret_for(kind: TokenKind, jwt_config: &JwtConfig) -> &[u8] {
    match kind {
        TokenKind::Access => jwt_config.access_secret.as_bytes(),
        TokenKind::Refresh => jwt_config.refresh_secret.as_bytes(),
    }
}

/// Lifetime in seconds of a token of the given kind.
pub fn ttl_for(kind: TokenKind, jwt_config: &JwtConfig) -> i64 {
    match kind {
        TokenKind::Access => jwt_config.access_token_expiry,
        TokenKind::Refresh => jwt_config.refresh_token_expiry,
    }
}

fn issue_token(
    account_id: Uuid,
    role: AccountRole,
    kind: TokenKind,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + ttl_for(kind, jwt_config).max(0) as usize;

    let claims = Claims {
        sub: account_id.to_string(),
        role,
        kind,
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret_for(kind, jwt_config)),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

pub fn issue_access_token(
    account_id: Uuid,
    role: AccountRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    issue_token(account_id, role, TokenKind::Access, jwt_config)
}

pub fn issue_refresh_token(
    account_id: Uuid,
    role: AccountRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    issue_token(account_id, role, TokenKind::Refresh, jwt_config)
}

pub fn issue_token_pair(
    account_id: Uuid,
    role: AccountRole,
    jwt_config: &JwtConfig,
) -> Result<TokenPair, AppError> {
    Ok(TokenPair {
        access_token: issue_access_token(account_id, role, jwt_config)?,
        refresh_token: issue_refresh_token(account_id, role, jwt_config)?,
    })
}

/// Verifies `token` as a token of `expected` kind and returns its claims.
///
/// # Errors
///
/// Returns 401 when the signature, expiry, shape or kind is wrong.
pub fn verify_token(
    token: &str,
    expected: TokenKind,
    jwt_config: &JwtConfig,
) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret_for(expected, jwt_config)),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))?;

    if claims.kind != expected {
        return Err(AppError::unauthorized("Invalid token type".to_string()));
    }

    Ok(claims)
}
