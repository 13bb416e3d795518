//! Classifier Oracle
//!
//! Model được coi như một hàm đóng: batch tensor (1, 224, 224, 3) →
//! probability vector, thứ tự theo lúc train.
//! Tách trait riêng để dễ swap model (ONNX, fake cho test, ...).

pub mod onnx;
pub mod fixed;

pub use onnx::OnnxOracle;
pub use fixed::FixedOracle;

use crate::error::OracleError;
use crate::preprocess::NormalizedImage;

// ============================================================================
// ORACLE TRAIT
// ============================================================================

/// One loaded classifier, shared across requests.
///
/// Implementations must be safe to call from several threads; serializing
/// calls internally is fine.
pub trait ClassifierOracle: Send + Sync {
    /// Human readable model identifier (path, "<memory>", ...)
    fn name(&self) -> &str;

    /// Probability per class for a single-item batch.
    fn predict(&self, batch: &NormalizedImage) -> Result<Vec<f32>, OracleError>;
}
