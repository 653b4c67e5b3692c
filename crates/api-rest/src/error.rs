//! REST error type and HTTP status mapping.
//!
//! Core errors map onto responses as follows:
//!
//! | Core error                 | Status | `detail`                                  |
//! |----------------------------|--------|-------------------------------------------|
//! | `Validation { field, .. }` | 422    | `invalid <field>: <reason>`               |
//! | `DuplicateId`              | 400    | `Patient with this ID already exists`     |
//! | `NotFound`                 | 404    | `Patient not found`                       |
//! | anything else              | 500    | `Internal error`                          |
//!
//! Every error body is `{"detail": <message>}`; API clients read exactly
//! that field.

use aura_core::PatientError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// An HTTP error response carrying a status code and a `detail` message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<PatientError> for ApiError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::Validation { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            PatientError::DuplicateId(_) => Self::new(
                StatusCode::BAD_REQUEST,
                "Patient with this ID already exists",
            ),
            PatientError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Patient not found"),
            other => {
                tracing::error!("patient operation failed: {}", other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
