#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use campus::campus_config::{CorsConfig, JwtConfig, RateLimitConfig, ServerConfig};
use campus::campus_core::hash_password;
use campus::campus_db::{AccountStore, MemoryAccountStore};
use campus::campus_models::{
    Account, NewAccount, NewStudentProfile, StudentProfile, SubRole,
};
use campus::router::init_router;
use campus::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "secret123";

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn generate_unique_email() -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("user{}_{}@college.test", n, uuid::Uuid::new_v4().simple())
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604_800,
    }
}

/// Application wired to an in-memory store with rate limiting off.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryAccountStore>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_rate_limit(RateLimitConfig::disabled())
    }

    pub fn with_rate_limit(rate_limit_config: RateLimitConfig) -> Self {
        let store = Arc::new(MemoryAccountStore::new());
        let state = AppState {
            store: store.clone(),
            jwt_config: test_jwt_config(),
            cors_config: CorsConfig {
                allowed_origin: "http://localhost:5173".to_string(),
            },
            rate_limit_config,
            server_config: ServerConfig::default(),
        };
        Self {
            router: init_router(state.clone()),
            store,
            state,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn create_student(&self, email: &str) -> (Account, StudentProfile) {
        self.store
            .create_student_account(
                NewAccount::student(email.to_string(), hash_password(TEST_PASSWORD).unwrap()),
                NewStudentProfile {
                    first_name: "Stu".to_string(),
                    last_name: "Dent".to_string(),
                    department: Some("Physics".to_string()),
                    year: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
    }

    pub async fn create_academic(&self, email: &str, sub_role: SubRole) -> Account {
        self.store
            .create_account(
                NewAccount::academic(
                    email.to_string(),
                    hash_password(TEST_PASSWORD).unwrap(),
                    sub_role,
                    "Ada Lovelace".to_string(),
                )
                .with_department(Some("Mathematics".to_string())),
            )
            .await
            .unwrap()
    }

    /// Logs in and returns the `Cookie` header value carrying both tokens.
    pub async fn login(&self, email: &str, role: &str) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/api/auth/login",
                None,
                serde_json::json!({ "email": email, "password": TEST_PASSWORD, "role": role }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        cookie_header(&response)
    }

    pub async fn admin_session(&self) -> (Account, String) {
        let admin = self
            .create_academic(&generate_unique_email(), SubRole::Administrative)
            .await;
        let cookies = self.login(&admin.email, "academic").await;
        (admin, cookies)
    }

    pub async fn faculty_session(&self) -> (Account, String) {
        let faculty = self
            .create_academic(&generate_unique_email(), SubRole::Faculty)
            .await;
        let cookies = self.login(&faculty.email, "academic").await;
        (faculty, cookies)
    }

    pub async fn student_session(&self) -> (Account, StudentProfile, String) {
        let (account, profile) = self.create_student(&generate_unique_email()).await;
        let cookies = self.login(&account.email, "student").await;
        (account, profile, cookies)
    }
}

pub fn json_request(method: &str, uri: &str, cookies: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, cookies: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::empty()).unwrap()
}

/// All `Set-Cookie` headers of a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Turns the `Set-Cookie` headers into a request `Cookie` header value.
pub fn cookie_header(response: &Response<Body>) -> String {
    set_cookies(response)
        .iter()
        .filter_map(|c| c.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Value of one cookie from the `Set-Cookie` headers.
pub fn cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    set_cookies(response).iter().find_map(|c| {
        let pair = c.split(';').next()?;
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.to_string())
    })
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}
