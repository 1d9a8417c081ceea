//! Response types and error mapping for the payroll engine API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::extract::ExtractionOutcome;
use crate::reconcile::ReconcileOutcome;

/// Response body for the `/import/preview` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPreviewResponse {
    /// The sheet the import read.
    pub sheet: String,
    /// Which mapping source resolved: `rich` or `migrated_legacy`.
    pub config_source: String,
    /// Extraction result: accepted records and per-row rejections.
    pub extraction: ExtractionOutcome,
    /// Classification of the batch against the provided snapshot.
    pub reconciliation: ReconcileOutcome,
    /// Number of bounded chunks the write plan splits into.
    pub write_chunks: usize,
}

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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {path}"),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {path}: {message}"),
                ),
            },
            EngineError::ConfigUnresolved { business_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "CONFIG_UNRESOLVED",
                    format!("No payroll config resolved for business '{business_id}'"),
                    "Neither a payroll config nor a legacy mapping exists for this business",
                ),
            },
            EngineError::RateTableMissing { year } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "RATE_TABLE_MISSING",
                    format!("No rate table for year {year}"),
                    "Statutory rates for the requested year are not loaded",
                ),
            },
            EngineError::InsufficientWageHistory {
                employment_id,
                periods_found,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INSUFFICIENT_WAGE_HISTORY",
                    format!("Insufficient wage history for employment '{employment_id}'"),
                    format!("Only {periods_found} of 3 trailing periods carry a ledger entry"),
                ),
            },
            EngineError::EmptyAverageWindow { employment_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "EMPTY_AVERAGE_WINDOW",
                    format!("Average wage window for employment '{employment_id}' has zero days"),
                ),
            },
            EngineError::ChunkTooLarge { size, max } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "CHUNK_TOO_LARGE",
                    format!("Write chunk of {size} exceeds the maximum batch size of {max}"),
                ),
            },
            EngineError::InvalidPeriod { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_PERIOD", format!("Invalid period '{value}'")),
            },
            EngineError::InvalidEmployment { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_EMPLOYMENT",
                    format!("Invalid employment field '{field}'"),
                    message,
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("CALCULATION_ERROR", message),
            },
        }
    }
}
