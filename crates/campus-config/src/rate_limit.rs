//! Rate limiting configuration for API endpoints.
//!
//! Limits are token buckets keyed by client IP (`X-Forwarded-For`, `X-Real-IP`,
//! `Forwarded`, then the peer address):
//!
//! - General API: a burst of 100 requests, one token back every 9 seconds
//!   (about 100 requests per 15 minutes).
//! - Login: a burst of 5, one token back every 180 seconds (about 5 attempts per
//!   15 minutes).
//! - Registration: a burst of 3, one token back every 1200 seconds (about 3 per hour).
//!
//! Token refresh and logout are only subject to the general limit.
//!
//! # Environment Variables
//!
//! - `RATE_LIMIT_ENABLED`: `false` or `0` disables limiting (default: enabled)
//! - `RATE_LIMIT_GENERAL_PER_SECOND`: seconds per replenished token (default: 9)
//! - `RATE_LIMIT_GENERAL_BURST_SIZE`: bucket size (default: 100)
//! - `RATE_LIMIT_AUTH_PER_SECOND`: seconds per replenished token (default: 180)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: bucket size (default: 5)
//! - `RATE_LIMIT_REGISTER_PER_SECOND`: seconds per replenished token (default: 1200)
//! - `RATE_LIMIT_REGISTER_BURST_SIZE`: bucket size (default: 3)

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

pub type IpGovernorConfig =
    GovernorConfig<SmartIpKeyExtractor, ::governor::middleware::NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,

    /// Seconds between replenished tokens for general endpoints.
    pub general_per_second: u64,

    /// Maximum burst for general endpoints.
    pub general_burst_size: u32,

    /// Seconds between replenished tokens for auth endpoints.
    pub auth_per_second: u64,

    /// Maximum burst for auth endpoints.
    pub auth_burst_size: u32,

    /// Seconds between replenished tokens for registration.
    pub register_per_second: u64,

    /// Maximum burst for registration.
    pub register_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            general_per_second: 9,
            general_burst_size: 100,
            auth_per_second: 180,
            auth_burst_size: 5,
            register_per_second: 1200,
            register_burst_size: 3,
        }
    }
}

impl RateLimitConfig {
    /// Falls back to defaults for unset or unparsable variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            general_per_second: std::env::var("RATE_LIMIT_GENERAL_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.general_per_second),
            general_burst_size: std::env::var("RATE_LIMIT_GENERAL_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.general_burst_size),
            auth_per_second: std::env::var("RATE_LIMIT_AUTH_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.auth_per_second),
            auth_burst_size: std::env::var("RATE_LIMIT_AUTH_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.auth_burst_size),
            register_per_second: std::env::var("RATE_LIMIT_REGISTER_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.register_per_second),
            register_burst_size: std::env::var("RATE_LIMIT_REGISTER_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.register_burst_size),
        }
    }

    /// A config that never limits, used by tests and local tooling.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Governor config for general API endpoints.
    ///
    /// Returns `None` when limiting is disabled or a zero period or burst makes
    /// the bucket unbuildable.
    #[must_use]
    pub fn general_governor_config(&self) -> Option<IpGovernorConfig> {
        if !self.enabled {
            return None;
        }
        GovernorConfigBuilder::default()
            .per_second(self.general_per_second)
            .burst_size(self.general_burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
    }

    /// Governor config for the login endpoint.
    #[must_use]
    pub fn auth_governor_config(&self) -> Option<IpGovernorConfig> {
        if !self.enabled {
            return None;
        }
        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
    }

    /// Governor config for the registration endpoint.
    #[must_use]
    pub fn register_governor_config(&self) -> Option<IpGovernorConfig> {
        if !self.enabled {
            return None;
        }
        GovernorConfigBuilder::default()
            .per_second(self.register_per_second)
            .burst_size(self.register_burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
    }
}
