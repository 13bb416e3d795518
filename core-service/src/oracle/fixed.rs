//! Fixed Oracle - returns a preset output, no model needed.

use super::ClassifierOracle;
use crate::error::OracleError;
use crate::preprocess::NormalizedImage;

#[derive(Debug, Clone)]
pub struct FixedOracle {
    output: Result<Vec<f32>, String>,
}

impl FixedOracle {
    pub fn new(probabilities: Vec<f32>) -> Self {
        Self {
            output: Ok(probabilities),
        }
    }

    /// Every prediction fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            output: Err(reason.into()),
        }
    }
}

impl ClassifierOracle for FixedOracle {
    fn name(&self) -> &str {
        "fixed"
    }

    fn predict(&self, _batch: &NormalizedImage) -> Result<Vec<f32>, OracleError> {
        self.output.clone().map_err(OracleError::Inference)
    }
}
