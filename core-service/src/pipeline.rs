//! Detection Pipeline
//!
//! bytes → normalize → oracle → decide.
//! Oracle được inject từ ngoài (không có global model); pipeline tự kiểm tra
//! số output của oracle khớp với LabelSet ngay lúc khởi tạo.

use std::sync::Arc;
use std::time::Instant;

use crate::decision::{DecisionConfig, DecisionEngine, DecisionResult, PROBABILITY_SUM_TOLERANCE};
use crate::error::PipelineError;
use crate::oracle::ClassifierOracle;
use crate::preprocess::{blank_batch, normalize};

pub struct DetectionPipeline {
    oracle: Arc<dyn ClassifierOracle>,
    engine: DecisionEngine,
}

impl std::fmt::Debug for DetectionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionPipeline")
            .field("oracle", &self.oracle.name())
            .field("engine", &self.engine)
            .finish()
    }
}

impl DetectionPipeline {
    /// Build the pipeline and validate the oracle against the label set.
    ///
    /// Runs one probe inference on a blank batch: a wrong output cardinality
    /// is `LabelMismatch`, a failing oracle is `OracleUnavailable`.
    pub fn new(
        oracle: Arc<dyn ClassifierOracle>,
        config: DecisionConfig,
    ) -> Result<Self, PipelineError> {
        let probe = oracle.predict(&blank_batch())?;
        let expected = config.labels().len();
        if probe.len() != expected {
            log::error!(
                "Oracle '{}' returns {} values but {} class labels are configured {:?}",
                oracle.name(),
                probe.len(),
                expected,
                config.labels().names()
            );
            return Err(PipelineError::LabelMismatch {
                expected,
                actual: probe.len(),
            });
        }

        log::info!(
            "Detection pipeline ready: oracle={}, classes={:?}, threshold={}",
            oracle.name(),
            config.labels().names(),
            config.confidence_threshold()
        );

        Ok(Self {
            oracle,
            engine: DecisionEngine::new(config),
        })
    }

    pub fn config(&self) -> &DecisionConfig {
        self.engine.config()
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    /// One full detection run. Either a complete result or a classified error.
    pub fn run(&self, image_bytes: &[u8]) -> Result<DecisionResult, PipelineError> {
        let start = Instant::now();

        let batch = normalize(image_bytes)?;
        let probabilities = self.oracle.predict(&batch)?;

        let sum: f32 = probabilities.iter().sum();
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            log::warn!(
                "Oracle output does not sum to 1.0 (sum={:.4}): {:?}",
                sum,
                probabilities
            );
        }

        let result = self.engine.decide(&probabilities).inspect_err(|e| {
            log::error!("Decision failed, service misconfigured: {}", e);
        })?;

        log::debug!(
            "Decision: {} ({}%) - {} in {} ms",
            result.predicted_class,
            result.confidence_percent(),
            result.alert_level,
            start.elapsed().as_millis()
        );

        Ok(result)
    }
}
