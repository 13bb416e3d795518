//! Firewatch Cloud Server
//!
//! Fire & Smoke detection API for ESP32-CAM style camera devices.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    FIREWATCH CLOUD                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌───────────────────┐  │
//! │  │  API      │   │  Image       │   │  Decision         │  │
//! │  │  (Axum)   │──▶│  Normalizer  │──▶│  Engine           │  │
//! │  └───────────┘   └──────┬───────┘   └─────────▲─────────┘  │
//! │                         ▼                     │            │
//! │                  ┌──────────────┐             │            │
//! │                  │ ONNX Oracle  │─────────────┘            │
//! │                  └──────────────┘                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod handlers;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use firewatch_core::{DecisionConfig, DetectionPipeline, OnnxOracle, PipelineError};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    init_tracing(&config);

    let decision = config
        .decision_config()
        .context("invalid CLASS_NAMES / CONFIDENCE_THRESHOLD")?;

    tracing::info!("{}", "=".repeat(60));
    tracing::info!("FIRE DETECTION API SERVER");
    tracing::info!("Model: {}", config.model_path);
    tracing::info!("Classes: {:?}", decision.labels().names());
    tracing::info!("Confidence threshold: {}", decision.confidence_threshold());
    tracing::info!("Port: {}", config.port);
    tracing::info!("{}", "=".repeat(60));

    let pipeline = load_pipeline(&config, &decision)?;

    // Build application state
    let state = AppState {
        pipeline,
        decision,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// None when the model failed to load; /predict answers 500
    pub pipeline: Option<Arc<DetectionPipeline>>,
    pub decision: DecisionConfig,
    pub config: config::Config,
}

fn init_tracing(config: &config::Config) {
    let default_filter = if config.is_production() {
        "firewatch_cloud=info,firewatch_core=info,tower_http=info"
    } else {
        "firewatch_cloud=debug,firewatch_core=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Load the model and validate it against the configured classes.
///
/// A missing or broken model keeps the server up in degraded mode; a class
/// count mismatch means the service is misconfigured and must not start.
fn load_pipeline(
    config: &config::Config,
    decision: &DecisionConfig,
) -> anyhow::Result<Option<Arc<DetectionPipeline>>> {
    let oracle = match OnnxOracle::from_file(&config.model_path) {
        Ok(oracle) => oracle,
        Err(e) => {
            tracing::error!("Error loading model: {}", e);
            return Ok(None);
        }
    };

    match DetectionPipeline::new(Arc::new(oracle), decision.clone()) {
        Ok(pipeline) => {
            tracing::info!("Model loaded successfully from {}", config.model_path);
            Ok(Some(Arc::new(pipeline)))
        }
        Err(e @ PipelineError::LabelMismatch { .. }) => {
            Err(e).context("model output does not match CLASS_NAMES")
        }
        Err(e) => {
            tracing::error!("Model failed startup probe: {}", e);
            Ok(None)
        }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::health::home))
        .route("/test", get(handlers::health::test))
        .route("/predict", post(handlers::predict::predict))
        .fallback(handlers::health::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    AppError::InternalError(detail).into_response()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

// ============================================================================
// TESTS
// ============================================================================
