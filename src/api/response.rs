//! Response types for the payroll API.
//!
//! This module defines the error body and the mapping from engine errors to
//! HTTP status codes, plus the commission preview body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::CommissionPolicy;
use crate::error::EngineError;
use crate::models::CommissionBreakdown;

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

    /// Creates an error for a path id that is not a positive integer.
    pub fn invalid_id(raw: &str) -> Self {
        Self::with_details(
            "INVALID_ID",
            format!("Invalid id: {}", raw),
            "Ids are positive integers",
        )
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
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::PlumberNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("PLUMBER_NOT_FOUND", message),
            },
            EngineError::JobNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("JOB_NOT_FOUND", message),
            },
            EngineError::PayrollNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("PAYROLL_NOT_FOUND", message),
            },
            EngineError::InvalidReference { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "INVALID_REFERENCE",
                    message,
                    "The payroll contains a job whose plumber no longer exists",
                ),
            },
            EngineError::PayrollFinalized { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "PAYROLL_FINALIZED",
                    message,
                    "Reopen the payroll as a draft before changing its jobs",
                ),
            },
            EngineError::Validation { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(message),
            },
            EngineError::AmountOutOfRange { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "AMOUNT_OUT_OF_RANGE",
                    message,
                    "The amounts involved are too large to total",
                ),
            },
        }
    }
}

/// Body of a commission preview: the exact breakdown plus a copy rounded to
/// cents for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionPreview {
    /// Full-precision breakdown.
    #[serde(flatten)]
    pub breakdown: CommissionBreakdown,
    /// The same breakdown rounded to cents.
    pub rounded: CommissionBreakdown,
}

impl CommissionPreview {
    /// Builds the preview, rounding with `policy`.
    pub fn new(breakdown: CommissionBreakdown, policy: &CommissionPolicy) -> Self {
        Self {
            breakdown,
            rounded: breakdown.map(|v| policy.round_currency(v)),
        }
    }
}
