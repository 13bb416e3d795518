//! Configuration module

use std::env;

use firewatch_core::decision::DEFAULT_CONFIDENCE_THRESHOLD;
use firewatch_core::{ConfigError, DecisionConfig, LabelSet};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// ONNX model file
    pub model_path: String,

    /// Class names in the order the model outputs them
    pub class_names: String,

    /// Minimum confidence for an actionable alert
    pub confidence_threshold: f32,

    /// Max request body (multipart upload) in bytes
    pub max_upload_bytes: usize,

    /// Log output: "pretty" or "json"
    pub log_format: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "fire_smoke_detection_model.onnx".to_string()),

            class_names: env::var("CLASS_NAMES")
                .unwrap_or_else(|_| "Fire,Neutral,Smoke".to_string()),

            confidence_threshold: env::var("CONFIDENCE_THRESHOLD")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD),

            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(10 * 1024 * 1024),

            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string()),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Validated decision config (label order + threshold)
    pub fn decision_config(&self) -> Result<DecisionConfig, ConfigError> {
        let labels = LabelSet::parse(&self.class_names)?;
        DecisionConfig::new(labels, self.confidence_threshold)
    }

    pub fn log_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            model_path: "fire_smoke_detection_model.onnx".to_string(),
            class_names: "Fire,Neutral,Smoke".to_string(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_upload_bytes: 10 * 1024 * 1024,
            log_format: "pretty".to_string(),
            environment: "development".to_string(),
        }
    }
}
