mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use campus::campus_config::RateLimitConfig;
use common::{TestApp, set_cookies};

fn strict_config() -> RateLimitConfig {
    RateLimitConfig {
        enabled: true,
        general_per_second: 60,
        general_burst_size: 2,
        auth_per_second: 60,
        auth_burst_size: 1,
        register_per_second: 60,
        register_burst_size: 1,
    }
}

fn login_from(ip: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", ip)
        .body(Body::from(
            r#"{"email":"nobody@college.test","password":"whatever","role":"student"}"#,
        ))
        .unwrap()
}

fn post_from(uri: &str, ip: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", ip)
        .body(Body::from(body))
        .unwrap()
}

fn get_from(uri: &str, ip: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("x-forwarded-for", ip)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_auth_routes_are_limited_per_ip() {
    let app = TestApp::with_rate_limit(strict_config());

    let first = app.send(login_from("203.0.113.7")).await;
    assert_eq!(first.status(), StatusCode::UNAUTHORIZED);

    let second = app.send(login_from("203.0.113.7")).await;
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    let other_client = app.send(login_from("198.51.100.20")).await;
    assert_eq!(other_client.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_general_routes_are_limited() {
    let app = TestApp::with_rate_limit(strict_config());

    for _ in 0..2 {
        let response = app.send(get_from("/api/students", "192.0.2.1")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let limited = app.send(get_from("/api/students", "192.0.2.1")).await;
    assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_health_is_not_limited() {
    let app = TestApp::with_rate_limit(strict_config());

    for _ in 0..5 {
        let response = app.send(get_from("/api/health", "192.0.2.9")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_disabled_limits_never_reject() {
    let app = TestApp::new();

    for _ in 0..10 {
        let response = app.send(login_from("203.0.113.50")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_logout_clears_cookies_after_login_limit_is_hit() {
    let app = TestApp::with_rate_limit(RateLimitConfig::default());

    for _ in 0..5 {
        let response = app.send(login_from("10.0.0.1")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
    let limited = app.send(login_from("10.0.0.1")).await;
    assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);

    let logout = app
        .send(post_from("/api/auth/logout", "10.0.0.1", ""))
        .await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);
    let cleared = set_cookies(&logout);
    assert_eq!(cleared.len(), 2);
    assert!(cleared.iter().all(|c| c.contains("Max-Age=0")));

    let refresh = app
        .send(post_from("/api/auth/refresh", "10.0.0.1", ""))
        .await;
    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(set_cookies(&refresh).len(), 2);
}

#[tokio::test]
async fn test_registration_has_its_own_bucket() {
    let app = TestApp::with_rate_limit(RateLimitConfig {
        register_burst_size: 1,
        ..RateLimitConfig::default()
    });

    let first = app
        .send(post_from("/api/auth/register", "10.0.0.2", r#"{"role":"student"}"#))
        .await;
    assert_eq!(first.status(), StatusCode::BAD_REQUEST);

    let second = app
        .send(post_from("/api/auth/register", "10.0.0.2", r#"{"role":"student"}"#))
        .await;
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    let login = app.send(login_from("10.0.0.2")).await;
    assert_eq!(login.status(), StatusCode::UNAUTHORIZED);
}
