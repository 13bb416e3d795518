//! Decision Engine
//!
//! CHỈ chứa logic decide - không có types, không có I/O.
//! Input: probability vector (thứ tự theo LabelSet)
//! Output: DecisionResult

use super::rules::DecisionConfig;
use super::types::{format_percent, AlertLevel, ClassScores, DecisionResult};
use crate::error::PipelineError;
use crate::labels::ClassLabel;

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    config: DecisionConfig,
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Turn a probability vector into an alert.
    ///
    /// Pure function of `probabilities` and the config. Values are used as-is,
    /// no renormalization.
    pub fn decide(&self, probabilities: &[f32]) -> Result<DecisionResult, PipelineError> {
        let labels = self.config.labels();
        if probabilities.len() != labels.len() {
            return Err(PipelineError::LabelMismatch {
                expected: labels.len(),
                actual: probabilities.len(),
            });
        }

        let predicted_idx = argmax_first(probabilities);
        let predicted_class = labels.get(predicted_idx).ok_or(PipelineError::LabelMismatch {
            expected: labels.len(),
            actual: probabilities.len(),
        })?;
        let confidence = probabilities[predicted_idx];
        let threshold = self.config.confidence_threshold();

        // Inclusive; NaN confidence is never reliable
        let is_reliable = confidence >= threshold;

        let all_predictions = ClassScores::new(
            labels
                .labels()
                .iter()
                .copied()
                .zip(probabilities.iter().copied())
                .collect(),
        );

        let alert_level = alert_level(predicted_class, is_reliable);
        let message = render_message(alert_level, confidence);

        Ok(DecisionResult {
            predicted_class,
            confidence,
            is_reliable,
            all_predictions,
            alert_level,
            message,
            threshold,
        })
    }
}

// ============================================================================
// RULES
// ============================================================================

/// Index of the maximum; ties go to the lowest index, NaN never wins.
pub fn argmax_first(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] || (values[best].is_nan() && !v.is_nan()) {
            best = i;
        }
    }
    best
}

/// Alert level from (label, reliability). Confidence alone never decides.
pub fn alert_level(label: ClassLabel, is_reliable: bool) -> AlertLevel {
    if !is_reliable {
        return AlertLevel::Uncertain;
    }
    match label {
        ClassLabel::Fire => AlertLevel::High,
        ClassLabel::Smoke => AlertLevel::Medium,
        ClassLabel::Neutral => AlertLevel::Safe,
    }
}

pub fn render_message(level: AlertLevel, confidence: f32) -> String {
    let pct = format_percent(confidence);
    match level {
        AlertLevel::High => format!("DANGER: Fire detected with {}% confidence!", pct),
        AlertLevel::Medium => format!("WARNING: Smoke detected with {}% confidence!", pct),
        AlertLevel::Safe => format!("SAFE: No fire or smoke detected ({}% confidence)", pct),
        AlertLevel::Uncertain => format!("UNCERTAIN: Low confidence prediction ({}%)", pct),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::rules::DEFAULT_CONFIDENCE_THRESHOLD;
    use crate::labels::LabelSet;

    /// Fire, Neutral, Smoke
    fn engine() -> DecisionEngine {
        DecisionEngine::default()
    }

    #[test]
    fn test_high_confidence_fire() {
        let result = engine().decide(&[0.95, 0.03, 0.02]).unwrap();

        assert_eq!(result.predicted_class, ClassLabel::Fire);
        assert_eq!(result.confidence, 0.95);
        assert!(result.is_reliable);
        assert_eq!(result.alert_level, AlertLevel::High);
        assert!(result.message.contains("95.0%"));
        assert_eq!(result.message, "DANGER: Fire detected with 95.0% confidence!");
        assert_eq!(result.threshold, DEFAULT_CONFIDENCE_THRESHOLD);
    }

    #[test]
    fn test_low_confidence_is_uncertain() {
        let result = engine().decide(&[0.40, 0.35, 0.25]).unwrap();

        assert_eq!(result.predicted_class, ClassLabel::Fire);
        assert!(!result.is_reliable);
        assert_eq!(result.alert_level, AlertLevel::Uncertain);
        assert_eq!(result.message, "UNCERTAIN: Low confidence prediction (40.0%)");
    }

    #[test]
    fn test_reliable_smoke_and_neutral() {
        let smoke = engine().decide(&[0.05, 0.05, 0.90]).unwrap();
        assert_eq!(smoke.predicted_class, ClassLabel::Smoke);
        assert_eq!(smoke.alert_level, AlertLevel::Medium);
        assert_eq!(smoke.message, "WARNING: Smoke detected with 90.0% confidence!");

        let neutral = engine().decide(&[0.1, 0.8, 0.1]).unwrap();
        assert_eq!(neutral.predicted_class, ClassLabel::Neutral);
        assert_eq!(neutral.alert_level, AlertLevel::Safe);
        assert_eq!(neutral.message, "SAFE: No fire or smoke detected (80.0% confidence)");
    }

    #[test]
    fn test_unreliable_smoke_is_uncertain_not_medium() {
        let result = engine().decide(&[0.2, 0.1, 0.7]).unwrap();
        assert_eq!(result.predicted_class, ClassLabel::Smoke);
        assert_eq!(result.alert_level, AlertLevel::Uncertain);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let result = engine().decide(&[0.5, 0.5, 0.0]).unwrap();
        assert_eq!(result.predicted_class, ClassLabel::Fire);

        let result = engine().decide(&[0.1, 0.45, 0.45]).unwrap();
        assert_eq!(result.predicted_class, ClassLabel::Neutral);
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let result = engine().decide(&[0.75, 0.15, 0.10]).unwrap();
        assert_eq!(result.confidence, 0.75);
        assert!(result.is_reliable);
        assert_eq!(result.alert_level, AlertLevel::High);
    }

    #[test]
    fn test_argmax_matches_max_for_unique_maximum() {
        let vectors: [[f32; 3]; 4] = [
            [0.2, 0.3, 0.5],
            [0.6, 0.3, 0.1],
            [0.01, 0.98, 0.01],
            [0.33, 0.34, 0.33],
        ];
        for v in vectors {
            let result = engine().decide(&v).unwrap();
            let max = v.iter().cloned().fold(f32::MIN, f32::max);
            assert_eq!(result.confidence, max);
            let idx = v.iter().position(|p| *p == max).unwrap();
            assert_eq!(Some(result.predicted_class), LabelSet::default().get(idx));
        }
    }

    #[test]
    fn test_all_predictions_pass_through_unmodified() {
        // Does not sum to 1.0
        let result = engine().decide(&[0.9, 0.9, 0.3]).unwrap();
        let scores: Vec<_> = result.all_predictions.iter().copied().collect();
        assert_eq!(
            scores,
            vec![
                (ClassLabel::Fire, 0.9),
                (ClassLabel::Neutral, 0.9),
                (ClassLabel::Smoke, 0.3),
            ]
        );
    }

    #[test]
    fn test_label_order_follows_config() {
        let labels = LabelSet::parse("Smoke,Fire,Neutral").unwrap();
        let engine = DecisionEngine::new(DecisionConfig::new(labels, 0.75).unwrap());

        let result = engine.decide(&[0.95, 0.03, 0.02]).unwrap();
        assert_eq!(result.predicted_class, ClassLabel::Smoke);
        assert_eq!(result.alert_level, AlertLevel::Medium);
    }

    #[test]
    fn test_custom_threshold() {
        let engine = DecisionEngine::new(DecisionConfig::new(LabelSet::default(), 0.35).unwrap());
        let result = engine.decide(&[0.40, 0.35, 0.25]).unwrap();
        assert!(result.is_reliable);
        assert_eq!(result.alert_level, AlertLevel::High);
        assert_eq!(result.threshold, 0.35);
    }

    #[test]
    fn test_length_mismatch() {
        let err = engine().decide(&[0.6, 0.4]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::LabelMismatch { expected: 3, actual: 2 }
        ));

        let err = engine().decide(&[0.25; 4]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::LabelMismatch { expected: 3, actual: 4 }
        ));
    }

    #[test]
    fn test_nan_never_wins() {
        assert_eq!(argmax_first(&[f32::NAN, 0.2, 0.8]), 2);
        assert_eq!(argmax_first(&[0.3, f32::NAN, 0.1]), 0);

        let result = engine().decide(&[f32::NAN, f32::NAN, f32::NAN]).unwrap();
        assert!(!result.is_reliable);
        assert_eq!(result.alert_level, AlertLevel::Uncertain);
    }

    #[test]
    fn test_decision_result_json_shape() {
        let result = engine().decide(&[0.95, 0.03, 0.02]).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["predicted_class"], "Fire");
        assert_eq!(json["alert_level"], "HIGH");
        assert_eq!(json["is_reliable"], true);
        assert!(json["all_predictions"]["Neutral"].is_number());
        assert!(json["threshold"].is_number());
    }
}
