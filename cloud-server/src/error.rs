//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use firewatch_core::PipelineError;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Request errors
    #[error("no image provided")]
    NoImage,
    #[error("invalid upload: {0}")]
    InvalidUpload(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("image preprocessing failed: {0}")]
    Preprocessing(String),

    // Routing
    #[error("endpoint not found")]
    NotFound,

    // Model errors
    #[error("model not loaded")]
    ModelNotLoaded,
    #[error("prediction failed: {0}")]
    PredictionFailed(String),

    // Generic errors
    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::NoImage => (
                StatusCode::BAD_REQUEST,
                "No image provided",
                "Please send an image file with key \"image\"".to_string(),
            ),
            AppError::InvalidUpload(msg) => (
                StatusCode::BAD_REQUEST,
                "No image provided",
                msg.clone(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Image too large",
                "Request body exceeds the upload limit".to_string(),
            ),
            AppError::Preprocessing(msg) => {
                tracing::debug!("Preprocessing error: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    "Image preprocessing failed",
                    "Unable to process the image".to_string(),
                )
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "Endpoint not found",
                "Available endpoints: / (GET), /predict (POST), /test (GET)".to_string(),
            ),
            AppError::ModelNotLoaded => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Model not loaded",
                "Server error - model initialization failed".to_string(),
            ),
            AppError::PredictionFailed(msg) => {
                tracing::error!("Prediction error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", msg.clone())
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error,
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::PreprocessingFailed(e) => AppError::Preprocessing(e.to_string()),
            PipelineError::LabelMismatch { .. } => {
                tracing::error!("Service misconfigured: {}", err);
                AppError::PredictionFailed(err.to_string())
            }
            PipelineError::OracleUnavailable(e) => AppError::PredictionFailed(e.to_string()),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::InvalidUpload(err.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firewatch_core::{OracleError, PreprocessError};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NoImage, StatusCode::BAD_REQUEST),
            (AppError::Preprocessing("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (AppError::ModelNotLoaded, StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::PredictionFailed("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_pipeline_error_conversion() {
        let client = AppError::from(PipelineError::from(PreprocessError::EmptyInput));
        assert!(matches!(client, AppError::Preprocessing(_)));

        let server = AppError::from(PipelineError::from(OracleError::Inference("oom".into())));
        assert!(matches!(server, AppError::PredictionFailed(_)));

        let mismatch = AppError::from(PipelineError::LabelMismatch { expected: 3, actual: 2 });
        assert!(matches!(mismatch, AppError::PredictionFailed(_)));
    }
}
