//! Application error type and its JSON response shape.
//!
//! Every handler returns `Result<_, AppError>`. Client errors render their message
//! together with an optional machine-readable `code` and field-level `details`;
//! server errors are logged and replaced by a generic body.

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub code: Option<&'static str>,
    pub details: Option<Vec<FieldError>>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            code: None,
            details: None,
        }
    }

    /// Attaches a machine-readable error code to the response body.
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::internal(anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!(message))
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// 400 carrying per-field messages.
    pub fn validation(details: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow!("Validation failed"),
            code: Some("VALIDATION_ERROR"),
            details: Some(details),
        }
    }

    /// 409 raised whenever an email is already bound to another account.
    pub fn email_taken() -> Self {
        Self::conflict(anyhow!("Email already exists")).with_code("EMAIL_EXISTS")
    }

    pub fn payload_too_large() -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            anyhow!("Request entity too large"),
        )
        .with_code("PAYLOAD_TOO_LARGE")
    }

    pub fn to_body(&self) -> ErrorResponse {
        if self.status.is_server_error() {
            return ErrorResponse {
                message: "Internal server error".to_string(),
                code: Some("INTERNAL_ERROR".to_string()),
                details: None,
            };
        }

        ErrorResponse {
            message: self.error.to_string(),
            code: self.code.map(str::to_string),
            details: self.details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = ?self.error, "Unhandled error");
        }

        let body = Json(self.to_body());
        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_client_error_keeps_message_and_code() {
        let (status, body) = body_json(
            AppError::unauthorized("Invalid credentials".to_string())
                .with_code("INVALID_CREDENTIALS"),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
        assert_eq!(body["code"], "INVALID_CREDENTIALS");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_server_error_hides_internals() {
        let (status, body) =
            body_json(AppError::internal(anyhow!("connection refused on 10.0.0.3"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let (status, body) = body_json(AppError::validation(vec![FieldError {
            field: "email".to_string(),
            message: "Valid email is required".to_string(),
        }]))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"][0]["field"], "email");
    }

    #[test]
    fn test_email_taken_is_conflict() {
        let err = AppError::email_taken();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, Some("EMAIL_EXISTS"));
        assert_eq!(err.error.to_string(), "Email already exists");
    }

    #[test]
    fn test_from_anyhow_defaults_to_internal() {
        let err: AppError = anyhow!("boom").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
