use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::auth::require_auth;
use crate::middleware::role::{require_academic, require_student};
use crate::middleware::security::{enforce_body_limit, with_security_headers};
use crate::modules::auth::router::{
    init_login_router, init_register_router, init_session_router, init_token_router,
};
use crate::modules::faculty::router::init_faculty_router;
use crate::modules::health::router::init_health_router;
use crate::modules::student_self::router::init_student_self_router;
use crate::modules::students::router::init_students_router;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use campus_config::rate_limit::IpGovernorConfig;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

/// Builds the full application router.
///
/// Layout under `/api`:
/// - `/health`: public, not rate limited
/// - `/auth`: login and registration (own stricter limits), refresh/logout and
///   the session endpoints
/// - `/students`: `/me*` for students, everything else for academics
/// - `/faculty`: academics, write operations for administrators
pub fn init_router(state: AppState) -> Router {
    let limits = &state.rate_limit_config;
    let auth_routes = with_limiter(init_login_router(), limits.auth_governor_config())
        .merge(with_limiter(
            init_register_router(),
            limits.register_governor_config(),
        ))
        .merge(init_token_router())
        .merge(init_session_router(state.clone()));

    // Static `/me` segments win over `/{id}` when the two routers are merged.
    let student_routes = init_student_self_router()
        .route_layer(middleware::from_fn(require_student))
        .merge(init_students_router().route_layer(middleware::from_fn(require_academic)))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let faculty_routes = init_faculty_router()
        .route_layer(middleware::from_fn(require_academic))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api = with_limiter(
        Router::new()
            .nest("/auth", auth_routes)
            .nest("/students", student_routes)
            .nest("/faculty", faculty_routes),
        limits.general_governor_config(),
    );

    let api = api.nest("/health", init_health_router());

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            enforce_body_limit,
        ))
        .layer(DefaultBodyLimit::max(state.server_config.body_limit))
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origin
                .parse()
                .ok()
                .into_iter()
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware));

    with_security_headers(router)
}

/// Wraps `router` in a per-IP governor when a config is present.
fn with_limiter(router: Router<AppState>, config: Option<IpGovernorConfig>) -> Router<AppState> {
    match config {
        Some(config) => router.layer(GovernorLayer::new(Arc::new(config))),
        None => router,
    }
}
