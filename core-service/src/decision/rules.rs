//! Decision Rules & Thresholds
//!
//! Ngưỡng confidence và cấu hình label cho Decision Engine.
//! KHÔNG chứa logic decide - chỉ constants và config.

use crate::error::ConfigError;
use crate::labels::LabelSet;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// At or above this confidence a prediction is actionable (75%)
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.75;

/// Oracle output further than this from a sum of 1.0 gets a warning
pub const PROBABILITY_SUM_TOLERANCE: f32 = 0.01;

// ============================================================================
// DECISION CONFIG
// ============================================================================

/// Immutable configuration of the Decision Engine, validated once.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionConfig {
    labels: LabelSet,
    confidence_threshold: f32,
}

impl DecisionConfig {
    pub fn new(labels: LabelSet, confidence_threshold: f32) -> Result<Self, ConfigError> {
        // (0, 1) open interval; NaN fails both comparisons
        if !(confidence_threshold > 0.0 && confidence_threshold < 1.0) {
            return Err(ConfigError::ThresholdOutOfRange(confidence_threshold));
        }
        Ok(Self {
            labels,
            confidence_threshold,
        })
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn confidence_threshold(&self) -> f32 {
        self.confidence_threshold
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            labels: LabelSet::default(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DecisionConfig::default();
        assert_eq!(config.confidence_threshold(), 0.75);
        assert_eq!(config.labels().len(), 3);
    }

    #[test]
    fn test_threshold_range() {
        assert!(DecisionConfig::new(LabelSet::default(), 0.5).is_ok());
        assert!(DecisionConfig::new(LabelSet::default(), 0.999).is_ok());

        for bad in [0.0, 1.0, -0.2, 1.5, f32::NAN] {
            let err = DecisionConfig::new(LabelSet::default(), bad).unwrap_err();
            assert!(matches!(err, ConfigError::ThresholdOutOfRange(_)));
        }
    }
}
