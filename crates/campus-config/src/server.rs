//! HTTP server settings: listen port, deployment environment and request limits.

use std::env;

/// Largest accepted request body. Avatars travel inline as base64 data URIs.
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: String,
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            environment: "development".to_string(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            body_limit: env::var("BODY_LIMIT_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.body_limit),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Session cookies are only marked `Secure` in production so local HTTP works.
    pub fn secure_cookies(&self) -> bool {
        self.is_production()
    }
}
