use std::env;

/// Signing configuration for session tokens.
///
/// Access and refresh tokens use distinct secrets so a leaked refresh secret cannot
/// mint access tokens and vice versa.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            access_secret: env::var("JWT_ACCESS_SECRET")
                .unwrap_or_else(|_| "dev-access-secret-change-in-production".to_string()),
            refresh_secret: env::var("JWT_REFRESH_SECRET")
                .unwrap_or_else(|_| "dev-refresh-secret-change-in-production".to_string()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(900), // 15 minutes
            refresh_token_expiry: env::var("JWT_REFRESH_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 7 days
        }
    }
}
