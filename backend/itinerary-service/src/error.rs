use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

pub const NO_DESCRIPTIONS: &str = "No descriptions provided";
pub const MISSING_ITINERARY_INPUT: &str = "Missing preferences or attractions";

/// Request-level failures, translated to HTTP only at the boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required input absent, empty or malformed
    #[error("{0}")]
    MissingInput(&'static str),

    #[error("{0}")]
    PredictionFailure(String),

    #[error("{0}")]
    ItineraryFailure(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::MissingInput(msg) => tracing::debug!("Rejected request: {}", msg),
            AppError::PredictionFailure(msg) => tracing::error!("Prediction failed: {}", msg),
            AppError::ItineraryFailure(msg) => tracing::error!("Itinerary generation failed: {}", msg),
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingInput(_) => StatusCode::BAD_REQUEST,
            AppError::PredictionFailure(_) | AppError::ItineraryFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<text_classifier::ClassifierError> for AppError {
    fn from(err: text_classifier::ClassifierError) -> Self {
        AppError::PredictionFailure(err.to_string())
    }
}
