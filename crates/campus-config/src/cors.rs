use std::env;

/// CORS is restricted to the single browser origin that hosts the portal UI.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origin: String,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origin = env::var("CLIENT_ORIGIN")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "http://localhost:5173".to_string());

        Self { allowed_origin }
    }
}
