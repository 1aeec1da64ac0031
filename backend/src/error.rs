//! Error handling for the Meteo Prediction service
//!
//! Every failure is mapped to a structured JSON body carrying a machine
//! readable code and a human-readable detail message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::inference::ModelError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("{0}")]
    InvalidDate(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Weather archive errors
    #[error("Weather API request failed: {0}")]
    Upstream(String),

    #[error("{0}")]
    DataUnavailable(String),

    // Model errors
    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub detail: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidDate(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_)
            | AppError::DataUnavailable(_)
            | AppError::Prediction(_)
            | AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidDate(_) => "INVALID_DATE",
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::DataUnavailable(_) => "DATA_UNAVAILABLE",
            AppError::Prediction(_) => "PREDICTION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<shared::DateError> for AppError {
    fn from(err: shared::DateError) -> Self {
        AppError::InvalidDate(err.to_string())
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::Prediction(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_detail = ErrorDetail {
            code: self.code().to_string(),
            detail: self.to_string(),
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
