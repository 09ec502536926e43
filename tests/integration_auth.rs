mod common;

use axum::http::StatusCode;
use campus::campus_auth::{Claims, TokenKind};
use campus::campus_db::AccountStore;
use campus::campus_models::{AccountRole, AccountStatus, SubRole};
use chrono::Utc;
use common::{
    TEST_PASSWORD, TestApp, body_json, cookie_header, cookie_value, empty_request,
    generate_unique_email, json_request, set_cookies, test_jwt_config,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use uuid::Uuid;

fn assert_session_cleared(response: &axum::http::Response<axum::body::Body>) {
    let cookies = set_cookies(response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().any(|c| c.starts_with("access_token=")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=")));
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
}

#[tokio::test]
async fn test_register_student_sets_cookies_and_returns_profile() {
    let app = TestApp::new();
    let email = generate_unique_email();

    let response = app
        .send(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "role": "student",
                "email": email.to_uppercase(),
                "password": "secret1",
                "firstName": "Stu",
                "lastName": "Dent",
                "year": 1,
                "contact": { "city": "Lagos" }
            }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(cookie_value(&response, "access_token").is_some());
    assert!(cookie_value(&response, "refresh_token").is_some());
    assert!(set_cookies(&response).iter().all(|c| c.contains("HttpOnly")));

    let body = body_json(response).await;
    assert_eq!(body["message"], "Registration successful");
    assert_eq!(body["user"]["email"], email);
    assert_eq!(body["user"]["role"], "student");
    assert!(body["user"].get("passwordHash").is_none());
    assert_eq!(body["profile"]["firstName"], "Stu");
    assert_eq!(body["profile"]["contact"]["city"], "Lagos");
    assert_eq!(body["profile"]["userId"], body["user"]["id"]);
}

#[tokio::test]
async fn test_register_academic_has_no_profile() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "role": "academic",
                "email": generate_unique_email(),
                "password": "secret1",
                "subRole": "faculty",
                "name": "Grace Hopper",
                "department": "Computer Science"
            }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "academic");
    assert_eq!(body["user"]["subRole"], "faculty");
    assert_eq!(body["user"]["department"], "Computer Science");
    assert!(body["profile"].is_null());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    let email = generate_unique_email();
    app.create_student(&email).await;

    let response = app
        .send(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "role": "student",
                "email": email,
                "password": "secret1",
                "firstName": "Again",
                "lastName": "Student"
            }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(set_cookies(&response).is_empty());
    let body = body_json(response).await;
    assert_eq!(body["message"], "Email already exists");
    assert_eq!(body["code"], "EMAIL_EXISTS");
}

#[tokio::test]
async fn test_register_academic_without_sub_role_is_rejected() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "role": "academic",
                "email": generate_unique_email(),
                "password": "secret1",
                "name": "No Subrole"
            }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_short_password_reports_field() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "role": "student",
                "email": generate_unique_email(),
                "password": "123",
                "firstName": "Stu",
                "lastName": "Dent"
            }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let details = body["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d["field"] == "password"));
}

#[tokio::test]
async fn test_login_success_sets_http_only_cookies() {
    let app = TestApp::new();
    let email = generate_unique_email();
    app.create_student(&email).await;

    let response = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": email, "password": TEST_PASSWORD, "role": "student" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    for cookie in &cookies {
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));
    }

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], email);
    assert!(body.get("accessToken").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    let email = generate_unique_email();
    app.create_student(&email).await;

    let response = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": email, "password": "wrong-password", "role": "student" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid credentials");
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": "nobody@college.test", "password": "whatever", "role": "academic" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_role_mismatch() {
    let app = TestApp::new();
    let email = generate_unique_email();
    app.create_academic(&email, SubRole::Faculty).await;

    let response = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": email, "password": TEST_PASSWORD, "role": "student" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["code"], "ROLE_MISMATCH");
}

#[tokio::test]
async fn test_login_inactive_account_is_rejected() {
    let app = TestApp::new();
    let email = generate_unique_email();
    let (account, _) = app.create_student(&email).await;
    app.store
        .set_account_status(account.id, AccountStatus::Inactive)
        .await
        .unwrap();

    let response = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": email, "password": TEST_PASSWORD, "role": "student" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_missing_role_is_validation_error() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": "a@college.test", "password": "whatever" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let app = TestApp::new();
    let (_, _, cookies) = app.student_session().await;

    let response = app
        .send(empty_request("POST", "/api/auth/refresh", Some(&cookies)))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(cookie_value(&response, "access_token").is_some_and(|v| !v.is_empty()));
    assert!(cookie_value(&response, "refresh_token").is_some_and(|v| !v.is_empty()));

    let rotated = cookie_header(&response);
    let body = body_json(response).await;
    assert_eq!(body["user"]["role"], "student");

    let me = app
        .send(empty_request("GET", "/api/auth/me", Some(&rotated)))
        .await;
    assert_eq!(me.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_without_cookie_clears_session() {
    let app = TestApp::new();

    let response = app
        .send(empty_request("POST", "/api/auth/refresh", None))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_session_cleared(&response);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new();
    let (_, _, cookies) = app.student_session().await;
    let access = cookies
        .split("; ")
        .find_map(|c| c.strip_prefix("access_token="))
        .unwrap()
        .to_string();

    let response = app
        .send(empty_request(
            "POST",
            "/api/auth/refresh",
            Some(&format!("refresh_token={access}")),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_session_cleared(&response);
}

#[tokio::test]
async fn test_refresh_for_deactivated_account_fails() {
    let app = TestApp::new();
    let (account, _, cookies) = app.student_session().await;
    app.store
        .set_account_status(account.id, AccountStatus::Inactive)
        .await
        .unwrap();

    let response = app
        .send(empty_request("POST", "/api/auth/refresh", Some(&cookies)))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_session_cleared(&response);
}

#[tokio::test]
async fn test_refresh_with_expired_token_clears_session() {
    let app = TestApp::new();
    let (account, _, _) = app.student_session().await;
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: account.id.to_string(),
        role: AccountRole::Student,
        kind: TokenKind::Refresh,
        exp: now - 3600,
        iat: now - 7200,
        jti: Uuid::new_v4().to_string(),
    };
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(test_jwt_config().refresh_secret.as_bytes()),
    )
    .unwrap();

    let response = app
        .send(empty_request(
            "POST",
            "/api/auth/refresh",
            Some(&format!("refresh_token={expired}")),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_session_cleared(&response);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid refresh token");
}

#[tokio::test]
async fn test_logout_clears_cookies() {
    let app = TestApp::new();
    let (_, _, cookies) = app.student_session().await;

    let response = app
        .send(empty_request("POST", "/api/auth/logout", Some(&cookies)))
        .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cleared = set_cookies(&response);
    assert_eq!(cleared.len(), 2);
    assert!(cleared.iter().all(|c| c.contains("Max-Age=0")));
}
