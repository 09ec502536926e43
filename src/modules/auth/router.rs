use crate::middleware::auth::require_auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::controller::{
    change_password, get_me, login, logout, refresh, register, update_profile,
};

/// Password login. Mounted behind the login limiter.
pub fn init_login_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Self-registration. Mounted behind the registration limiter.
pub fn init_register_router() -> Router<AppState> {
    Router::new().route("/register", post(register))
}

/// Cookie rotation and logout. Logout must always clear the session, so these
/// never sit behind the credential limiters.
pub fn init_token_router() -> Router<AppState> {
    Router::new()
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
}

/// Endpoints acting on the signed-in account.
pub fn init_session_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/password", put(change_password))
        .route("/profile", put(update_profile))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
