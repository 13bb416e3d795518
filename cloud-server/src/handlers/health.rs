//! Health / liveness handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};

#[derive(Serialize)]
pub struct Endpoints {
    predict: &'static str,
    health: &'static str,
    test: &'static str,
}

#[derive(Serialize)]
pub struct HomeResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    model_status: &'static str,
    model_name: Option<String>,
    classes: Vec<&'static str>,
    confidence_threshold: f32,
    endpoints: Endpoints,
}

/// GET / - service status
pub async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    let pipeline = state.pipeline.as_ref();

    Json(HomeResponse {
        status: "online",
        service: "Fire & Smoke Detection API",
        version: env!("CARGO_PKG_VERSION"),
        model_status: if pipeline.is_some() { "loaded" } else { "error" },
        model_name: pipeline.map(|p| p.oracle_name().to_string()),
        classes: state.decision.labels().names(),
        confidence_threshold: state.decision.confidence_threshold(),
        endpoints: Endpoints {
            predict: "/predict (POST)",
            health: "/ (GET)",
            test: "/test (GET)",
        },
    })
}

#[derive(Serialize)]
pub struct TestResponse {
    message: &'static str,
    model_loaded: bool,
    classes: Vec<&'static str>,
    test_prediction: &'static str,
}

/// GET /test - liveness echo, no model call
pub async fn test(State(state): State<AppState>) -> Json<TestResponse> {
    Json(TestResponse {
        message: "API is working!",
        model_loaded: state.pipeline.is_some(),
        classes: state.decision.labels().names(),
        test_prediction: "Send POST request to /predict with an image",
    })
}

/// Fallback for unmatched routes
pub async fn not_found() -> AppError {
    AppError::NotFound
}
