//! Error type and API response envelope

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error carrying a code, a message and optional details
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// Field-level context (resource name, offending value, ...)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// `"{resource} not found"` with the resource recorded in details
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Response envelope used for error bodies and message-only replies
///
/// - `code`: 0 on success, an [`ErrorCode`] value otherwise
/// - `message`: human-readable text, always present
/// - `data`: payload on success
/// - `details`: error context on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_new_uses_default_message() {
        let err = AppError::new(ErrorCode::ShiftAlreadyClosed);
        assert_eq!(err.message, "Shift is already closed");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_not_found_records_resource() {
        let err = AppError::not_found("Order 42");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Order 42 not found");
        assert_eq!(
            err.details.unwrap().get("resource").unwrap(),
            "Order 42"
        );
    }

    #[test]
    fn test_with_detail_accumulates() {
        let err = AppError::validation("bad line")
            .with_detail("product_id", 7)
            .with_detail("quantity", 0);
        let details = err.details.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details.get("quantity").unwrap(), 0);
    }

    #[test]
    fn test_error_envelope_serialization() {
        let err = AppError::new(ErrorCode::TableNumberExists);
        let json = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(json["code"], 7002);
        assert_eq!(json["message"], "Table number already exists");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(3);
        assert_eq!(resp.code, Some(0));
        assert_eq!(resp.data, Some(3));
        assert_eq!(ApiResponse::<()>::ok().message, "OK");
    }

    #[test]
    fn test_into_response_status() {
        let resp = AppError::new(ErrorCode::ShiftAlreadyOpen).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = AppError::not_authenticated().into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
