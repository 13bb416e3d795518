//! Error Types
//!
//! Phân loại lỗi của pipeline: lỗi client (ảnh hỏng), lỗi cấu hình
//! (label set lệch với model), lỗi server (oracle không dùng được).

use thiserror::Error;

// ============================================================================
// PREPROCESSING
// ============================================================================

/// Image could not be turned into a model input tensor.
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("empty image payload")]
    EmptyInput,

    #[error("image payload too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("cannot decode image: {0}")]
    Decode(String),

    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

// ============================================================================
// ORACLE
// ============================================================================

/// Classifier failed to load or to run.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("failed to load model: {0}")]
    Load(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("confidence threshold must be in (0, 1), got {0}")]
    ThresholdOutOfRange(f32),

    #[error("unknown class label '{0}'")]
    UnknownLabel(String),

    #[error("duplicate class label '{0}'")]
    DuplicateLabel(String),

    #[error("class list must contain Fire, Smoke and Neutral, got {0} label(s)")]
    IncompleteLabels(usize),
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Failure of one detection run. No partial result is ever produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("image preprocessing failed: {0}")]
    PreprocessingFailed(#[from] PreprocessError),

    #[error("label mismatch: {expected} configured labels, oracle returned {actual} values")]
    LabelMismatch { expected: usize, actual: usize },

    #[error("classifier unavailable: {0}")]
    OracleUnavailable(#[from] OracleError),
}

impl PipelineError {
    /// Caused by the request payload rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::PreprocessingFailed(_))
    }
}
