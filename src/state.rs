use std::sync::Arc;

use campus_config::{CorsConfig, JwtConfig, RateLimitConfig, ServerConfig};
use campus_db::{AccountStore, PgAccountStore, init_db_pool, run_migrations};

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<dyn AccountStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub server_config: ServerConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self {
            store,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            rate_limit_config: RateLimitConfig::from_env(),
            server_config: ServerConfig::from_env(),
        }
    }
}

/// Connects to PostgreSQL, applies migrations and loads configuration from the environment.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let pool = init_db_pool().await?;
    run_migrations(&pool).await?;

    Ok(AppState::new(Arc::new(PgAccountStore::new(pool))))
}
