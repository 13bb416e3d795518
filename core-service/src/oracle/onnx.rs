//! ONNX Oracle - ONNX Runtime Integration
//!
//! Load và chạy ONNX model (export từ Keras, input NHWC float32).
//! Session được giữ sau Mutex: `Session::run` cần `&mut`, các request
//! dùng chung một model nên inference được serialize.

use std::path::Path;

use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::Mutex;

use super::ClassifierOracle;
use crate::error::OracleError;
use crate::preprocess::NormalizedImage;

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

pub struct OnnxOracle {
    session: Mutex<Session>,
    output_name: String,
    model_name: String,
}

impl OnnxOracle {
    /// Load ONNX model từ file
    pub fn from_file(model_path: impl AsRef<Path>) -> Result<Self, OracleError> {
        let model_path = model_path.as_ref();
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(OracleError::ModelNotFound(model_path.display().to_string()));
        }

        let session = Session::builder()
            .map_err(|e| OracleError::Load(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| OracleError::Load(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| OracleError::Load(format!("Failed to load model: {}", e)))?;

        Self::from_session(session, model_path.display().to_string())
    }

    /// Load ONNX model từ bytes
    pub fn from_bytes(model_bytes: &[u8]) -> Result<Self, OracleError> {
        log::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| OracleError::Load(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| OracleError::Load(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| OracleError::Load(format!("Load from memory error: {}", e)))?;

        Self::from_session(session, "<memory>".to_string())
    }

    fn from_session(session: Session, model_name: String) -> Result<Self, OracleError> {
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| OracleError::Load("No output defined".to_string()))?;

        log::info!("ONNX model loaded successfully (output: {})", output_name);

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            model_name,
        })
    }
}

impl ClassifierOracle for OnnxOracle {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn predict(&self, batch: &NormalizedImage) -> Result<Vec<f32>, OracleError> {
        let start_time = std::time::Instant::now();
        let input_tensor = Tensor::from_array(batch.clone())
            .map_err(|e| OracleError::Inference(format!("Tensor error: {}", e)))?;

        let probabilities = {
            let mut session = self.session.lock();
            let outputs = session
                .run(ort::inputs![input_tensor])
                .map_err(|e| OracleError::Inference(format!("Inference failed: {}", e)))?;

            let output = outputs
                .get(&self.output_name)
                .ok_or_else(|| OracleError::Inference("No output".to_string()))?;

            let (_, data) = output
                .try_extract_tensor::<f32>()
                .map_err(|e| OracleError::Inference(format!("Extract error: {}", e)))?;

            // (1, n_classes) → n_classes
            data.to_vec()
        };

        log::debug!(
            "ONNX inference took {} us",
            start_time.elapsed().as_micros()
        );

        Ok(probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.onnx");

        let err = OnnxOracle::from_file(&path).err().unwrap();
        assert!(matches!(err, OracleError::ModelNotFound(_)));
    }
}
