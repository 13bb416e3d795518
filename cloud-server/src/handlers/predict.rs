//! Prediction handler

use std::time::Instant;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use chrono::Local;
use firewatch_core::DecisionResult;
use serde::Serialize;

use crate::{AppError, AppResult, AppState};

/// Multipart field carrying the frame
pub const IMAGE_FIELD: &str = "image";

#[derive(Serialize)]
pub struct PredictResponse {
    success: bool,
    #[serde(flatten)]
    result: DecisionResult,
    timestamp: String,
}

/// POST /predict - multipart field `image`
pub async fn predict(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<PredictResponse>> {
    let pipeline = state.pipeline.clone().ok_or(AppError::ModelNotLoaded)?;

    let mut multipart = multipart.map_err(|_| AppError::NoImage)?;
    let image_bytes = read_image_field(&mut multipart).await?;

    tracing::debug!("Received image ({} bytes)", image_bytes.len());

    // CPU-bound: decode + resize + inference
    let started = Instant::now();
    let result = tokio::task::spawn_blocking(move || pipeline.run(&image_bytes))
        .await
        .map_err(|e| AppError::PredictionFailed(format!("prediction task aborted: {}", e)))??;

    let elapsed_ms = started.elapsed().as_millis();

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    tracing::info!(
        elapsed_ms = elapsed_ms as u64,
        "[{}] Prediction: {} ({}%) - {} in {} ms",
        timestamp,
        result.predicted_class,
        result.confidence_percent(),
        result.alert_level,
        elapsed_ms
    );

    Ok(Json(PredictResponse {
        success: true,
        result,
        timestamp,
    }))
}

async fn read_image_field(multipart: &mut Multipart) -> AppResult<Vec<u8>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(IMAGE_FIELD) {
            return Ok(field.bytes().await?.to_vec());
        }
    }
    Err(AppError::NoImage)
}
