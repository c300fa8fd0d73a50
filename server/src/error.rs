//! Unified error handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Limit must be a natural number greater than 0.")]
    PaginationLimit,

    #[error("Cannot find startWith in hotel collection.")]
    PaginationStartWith,

    #[error("Hotel not found: {0}")]
    HotelNotFound(String),

    #[error("Hotel data is not accessible.")]
    NotAccessible(String),

    #[error("Upstream hotel data format validation failed.")]
    DataInvalid {
        violations: Vec<String>,
        data: Option<Value>,
    },

    #[error("Upstream registry is not accessible.")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<waypost_engine::Error> for ApiError {
    fn from(error: waypost_engine::Error) -> Self {
        match error {
            waypost_engine::Error::InvalidLimit => Self::PaginationLimit,
            waypost_engine::Error::MissingStartWith(_) => Self::PaginationStartWith,
        }
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    code: String,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, details, data) = match self {
            ApiError::PaginationLimit => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "paginationLimitError",
                None,
                None,
            ),
            ApiError::PaginationStartWith => (
                StatusCode::NOT_FOUND,
                "paginationStartWithError",
                None,
                None,
            ),
            ApiError::HotelNotFound(ref address) => {
                tracing::debug!("Hotel not found: {}", address);
                (StatusCode::NOT_FOUND, "hotelNotFound", None, None)
            }
            ApiError::NotAccessible(ref reason) => {
                tracing::warn!("Hotel data not accessible: {}", reason);
                (
                    StatusCode::BAD_GATEWAY,
                    "hotelNotAccessible",
                    Some(Value::String(reason.clone())),
                    None,
                )
            }
            ApiError::DataInvalid {
                ref violations,
                ref data,
            } => {
                tracing::warn!("Upstream data failed validation: {:?}", violations);
                (
                    StatusCode::BAD_GATEWAY,
                    "hotelDataInvalid",
                    Some(Value::Array(
                        violations.iter().cloned().map(Value::String).collect(),
                    )),
                    data.clone(),
                )
            }
            ApiError::Upstream(ref reason) => {
                tracing::error!("Upstream registry inaccessible: {}", reason);
                (
                    StatusCode::BAD_GATEWAY,
                    "upstreamError",
                    Some(Value::String(reason.clone())),
                    None,
                )
            }
            ApiError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    None,
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code.to_string(),
            error: self.to_string(),
            details,
            data,
        });

        (status, body).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
