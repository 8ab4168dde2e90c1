use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Failure of the energy model itself: an input for which the formula is undefined.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error("{0}")]
    Domain(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Estimate rejected: {0}")]
    Estimate(#[from] EstimateError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidInput(msg) => {
                warn!("Rejected request: {msg}");
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Estimate(e) => {
                warn!("Rejected estimate: {e}");
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
