//! Response types for the Payroll Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A `400 Bad Request` with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = match &error {
            EngineError::InvalidPeriod { .. } | EngineError::InvalidEmployee { .. } => {
                StatusCode::BAD_REQUEST
            }
            EngineError::EmployeeNotFound { .. } | EngineError::PayrollNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            EngineError::StorageConflict { .. }
            | EngineError::InvalidStatusTransition { .. }
            | EngineError::PayrollLocked { .. } => StatusCode::CONFLICT,
            EngineError::PolicyUnavailable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            EngineError::InvalidPolicy { .. }
            | EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::Storage { .. }
            | EngineError::CalculationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let code = error.code();
        let body = match &error {
            EngineError::InvalidPeriod { .. } => ApiError::with_details(
                code,
                error.to_string(),
                "Month must be 1-12 and year within the supported range",
            ),
            EngineError::PolicyUnavailable { .. } => ApiError::with_details(
                code,
                error.to_string(),
                "Configure a compensation policy for the period or retry without strict_policy",
            ),
            EngineError::PayrollLocked { .. } => ApiError::with_details(
                code,
                error.to_string(),
                "Paid payroll records are kept for audit",
            ),
            _ => ApiError::new(code, error.to_string()),
        };

        ApiErrorResponse {
            status,
            error: body,
        }
    }
}
